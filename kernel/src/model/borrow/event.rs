use super::super::id::{BookId, BorrowerId};
use chrono::{DateTime, Duration, Utc};
use derive_new::new;

pub const LOAN_PERIOD_DAYS: i64 = 14;

#[derive(Debug)]
pub struct CreateBorrow {
    pub book_id: BookId,
    pub borrower_id: BorrowerId,
    pub borrowed_at: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
}

impl CreateBorrow {
    pub fn new(book_id: BookId, borrower_id: BorrowerId, borrowed_at: DateTime<Utc>) -> Self {
        Self {
            book_id,
            borrower_id,
            borrowed_at,
            due_date: borrowed_at + Duration::days(LOAN_PERIOD_DAYS),
        }
    }
}

#[derive(new, Debug)]
pub struct ReturnBorrow {
    pub book_id: BookId,
    pub borrower_id: BorrowerId,
    pub returned_at: DateTime<Utc>,
}
