use chrono::{DateTime, NaiveDate, SecondsFormat, TimeZone, Utc};
use garde::Validate;
use kernel::model::borrow::{ReportEntry, ReportPeriod};
use serde::Deserialize;
use shared::error::{AppError, AppResult};

pub const REPORT_FILENAME: &str = "borrow_report.csv";
pub const NOT_RETURNED: &str = "Not Returned Yet";

const REPORT_HEADERS: [&str; 9] = [
    "Borrow ID",
    "Borrow Date",
    "Return Date",
    "Due Date",
    "Book Title",
    "Book Author",
    "Book ISBN",
    "Borrower Name",
    "Borrower Email",
];

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    #[garde(skip)]
    pub start_date: String,
    #[garde(skip)]
    pub end_date: String,
}

impl ReportRequest {
    /// Both dates must parse; the resulting period is inclusive at both ends.
    pub fn period(&self) -> AppResult<ReportPeriod> {
        let start = parse_date(&self.start_date).ok_or(AppError::InvalidDateFormat)?;
        let end = parse_date(&self.end_date).ok_or(AppError::InvalidDateFormat)?;
        Ok(ReportPeriod { start, end })
    }
}

fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    Utc.from_local_datetime(&date.and_hms_opt(0, 0, 0)?).single()
}

fn format_date(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn build_report_csv(entries: &[ReportEntry]) -> AppResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(REPORT_HEADERS)
        .map_err(|e| AppError::ReportExportError(e.to_string()))?;
    for entry in entries {
        let return_date = entry
            .returned_at
            .map(format_date)
            .unwrap_or_else(|| NOT_RETURNED.to_string());
        writer
            .write_record([
                entry.id.to_string(),
                format_date(entry.borrowed_at),
                return_date,
                format_date(entry.due_date),
                entry.book.title.clone(),
                entry.book.author.clone(),
                entry.book.isbn.clone(),
                entry.borrower.name.clone(),
                entry.borrower.email.clone(),
            ])
            .map_err(|e| AppError::ReportExportError(e.to_string()))?;
    }
    writer
        .into_inner()
        .map_err(|e| AppError::ReportExportError(e.to_string()))
}
