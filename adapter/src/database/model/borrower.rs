use chrono::{DateTime, Utc};
use kernel::model::{borrower::Borrower, id::BorrowerId};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BorrowerRow {
    pub borrower_id: BorrowerId,
    pub name: String,
    pub email: String,
    pub registered_date: DateTime<Utc>,
}

impl From<BorrowerRow> for Borrower {
    fn from(row: BorrowerRow) -> Self {
        let BorrowerRow {
            borrower_id,
            name,
            email,
            registered_date,
        } = row;
        Self {
            id: borrower_id,
            name,
            email,
            registered_date,
        }
    }
}
