use chrono::{DateTime, Utc};
use garde::Validate;
use kernel::model::{
    borrower::{event::UpdateBorrower, Borrower},
    id::BorrowerId,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterBorrowerRequest {
    #[garde(length(min = 3, max = 256))]
    pub name: String,
    #[garde(email, length(min = 3, max = 256))]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBorrowerRequest {
    #[garde(inner(length(min = 3, max = 256)))]
    pub name: Option<String>,
    #[garde(inner(email, length(min = 3, max = 256)))]
    pub email: Option<String>,
}

impl UpdateBorrowerRequest {
    pub fn into_event(self, borrower_id: BorrowerId) -> UpdateBorrower {
        let UpdateBorrowerRequest { name, email } = self;
        UpdateBorrower {
            borrower_id,
            name,
            email,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowerResponse {
    pub id: BorrowerId,
    pub name: String,
    pub email: String,
    pub registered_date: DateTime<Utc>,
}

impl From<Borrower> for BorrowerResponse {
    fn from(borrower: Borrower) -> Self {
        let Borrower {
            id,
            name,
            email,
            registered_date,
        } = borrower;
        Self {
            id,
            name,
            email,
            registered_date,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BorrowerListResponse {
    pub message: String,
    pub borrowers: Vec<BorrowerResponse>,
}

impl BorrowerListResponse {
    pub fn new(message: impl Into<String>, borrowers: Vec<Borrower>) -> Self {
        Self {
            message: message.into(),
            borrowers: borrowers.into_iter().map(BorrowerResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SingleBorrowerResponse {
    pub message: String,
    pub borrower: BorrowerResponse,
}

impl SingleBorrowerResponse {
    pub fn new(message: impl Into<String>, borrower: Borrower) -> Self {
        Self {
            message: message.into(),
            borrower: borrower.into(),
        }
    }
}
