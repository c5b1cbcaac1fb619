use super::id::BorrowerId;
use chrono::{DateTime, Utc};

pub mod event;

#[derive(Debug, Clone)]
pub struct Borrower {
    pub id: BorrowerId,
    pub name: String,
    pub email: String,
    pub registered_date: DateTime<Utc>,
}

/// The projection of a borrower joined onto report rows.
#[derive(Debug, Clone)]
pub struct BorrowerSummary {
    pub name: String,
    pub email: String,
}
