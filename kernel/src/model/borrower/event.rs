use super::super::id::BorrowerId;
use chrono::{DateTime, Utc};
use derive_new::new;

#[derive(new, Debug)]
pub struct CreateBorrower {
    pub name: String,
    pub email: String,
    pub registered_date: DateTime<Utc>,
}

// `registered_date` is immutable, so updates never carry it.
#[derive(new, Debug)]
pub struct UpdateBorrower {
    pub borrower_id: BorrowerId,
    pub name: Option<String>,
    pub email: Option<String>,
}
