use super::{
    book::BookSummary,
    borrower::BorrowerSummary,
    id::{BookId, BorrowId, BorrowerId},
};
use chrono::{DateTime, Months, Utc};

pub mod event;

/// A loan transaction. Created by the borrow operation, mutated exactly once
/// by the return operation, never deleted.
#[derive(Debug, Clone)]
pub struct Borrow {
    pub id: BorrowId,
    pub book_id: BookId,
    pub borrower_id: BorrowerId,
    pub borrowed_at: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub returned_at: Option<DateTime<Utc>>,
}

/// A borrow record joined with its book projection, as the listing queries
/// return it.
#[derive(Debug, Clone)]
pub struct BorrowedBook {
    pub id: BorrowId,
    pub book_id: BookId,
    pub borrower_id: BorrowerId,
    pub borrowed_at: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub returned_at: Option<DateTime<Utc>>,
    pub book: BookSummary,
}

/// A report row: the borrow record joined with both the book and the
/// borrower projections.
#[derive(Debug, Clone)]
pub struct ReportEntry {
    pub id: BorrowId,
    pub borrowed_at: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub returned_at: Option<DateTime<Utc>>,
    pub book: BookSummary,
    pub borrower: BorrowerSummary,
}

/// An open interval over timestamps, both bounds exclusive. "Last month" is
/// calendar-month subtraction, not a fixed 30-day span.
#[derive(Debug, Clone, Copy)]
pub struct BorrowWindow {
    pub after: DateTime<Utc>,
    pub before: DateTime<Utc>,
}

impl BorrowWindow {
    pub fn last_month(now: DateTime<Utc>) -> Self {
        Self {
            after: now - Months::new(1),
            before: now,
        }
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.after < at && at < self.before
    }
}

/// The report period, both bounds inclusive.
#[derive(Debug, Clone, Copy)]
pub struct ReportPeriod {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ReportPeriod {
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }
}
