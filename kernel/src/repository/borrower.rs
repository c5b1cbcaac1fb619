use crate::model::{
    borrower::{
        event::{CreateBorrower, UpdateBorrower},
        Borrower,
    },
    id::BorrowerId,
};
use async_trait::async_trait;
use shared::error::AppResult;

#[mockall::automock]
#[async_trait]
pub trait BorrowerRepository: Send + Sync {
    async fn create(&self, event: CreateBorrower) -> AppResult<Borrower>;
    // all borrowers, name ascending
    async fn find_all(&self) -> AppResult<Vec<Borrower>>;
    async fn find_by_id(&self, borrower_id: BorrowerId) -> AppResult<Option<Borrower>>;
    // uniqueness pre-check for register/update
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Borrower>>;
    async fn update(&self, event: UpdateBorrower) -> AppResult<Borrower>;
    // returns the deleted record
    async fn delete(&self, borrower_id: BorrowerId) -> AppResult<Borrower>;
}
