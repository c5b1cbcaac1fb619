use crate::model::{
    borrow::{
        event::{CreateBorrow, ReturnBorrow},
        Borrow, BorrowWindow, BorrowedBook, ReportEntry, ReportPeriod,
    },
    id::BorrowerId,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::error::AppResult;

#[mockall::automock]
#[async_trait]
pub trait BorrowRepository: Send + Sync {
    // borrow: decrement availability and insert the record atomically
    async fn borrow_book(&self, event: CreateBorrow) -> AppResult<Borrow>;
    // return: increment availability and stamp the return date atomically
    async fn return_book(&self, event: ReturnBorrow) -> AppResult<Borrow>;
    // every outstanding loan, any borrower
    async fn find_unreturned_all(&self) -> AppResult<Vec<BorrowedBook>>;
    // outstanding loans held by one borrower
    async fn find_unreturned_by_borrower(
        &self,
        borrower_id: BorrowerId,
    ) -> AppResult<Vec<BorrowedBook>>;
    // loans whose borrow date falls strictly inside the window
    async fn find_borrowed_in(&self, window: BorrowWindow) -> AppResult<Vec<BorrowedBook>>;
    // outstanding loans past due as of the given moment
    async fn find_due(
        &self,
        as_of: DateTime<Utc>,
        borrower_id: Option<BorrowerId>,
    ) -> AppResult<Vec<BorrowedBook>>;
    // outstanding loans whose due date falls strictly inside the window
    async fn find_due_in(&self, window: BorrowWindow) -> AppResult<Vec<BorrowedBook>>;
    // report rows for loans borrowed inside the inclusive period
    async fn find_borrowed_between(&self, period: ReportPeriod) -> AppResult<Vec<ReportEntry>>;
}
