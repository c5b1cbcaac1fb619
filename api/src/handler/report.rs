use crate::{
    extractor::ValidatedJson,
    model::report::{build_report_csv, ReportRequest, REPORT_FILENAME},
};
use axum::{extract::State, http::header, response::IntoResponse};
use registry::AppRegistry;
use shared::error::AppResult;

pub async fn generate_report(
    State(registry): State<AppRegistry>,
    ValidatedJson(request): ValidatedJson<ReportRequest>,
) -> AppResult<impl IntoResponse> {
    let period = request.period()?;
    let entries = registry
        .borrow_repository()
        .find_borrowed_between(period)
        .await?;
    let csv = build_report_csv(&entries)?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={REPORT_FILENAME}"),
            ),
        ],
        csv,
    ))
}
