use crate::model::{
    book::{
        event::{CreateBook, UpdateBook},
        Book, BookSearchQuery,
    },
    id::BookId,
};
use async_trait::async_trait;
use shared::error::AppResult;

#[mockall::automock]
#[async_trait]
pub trait BookRepository: Send + Sync {
    async fn create(&self, event: CreateBook) -> AppResult<Book>;
    // all books, title ascending
    async fn find_all(&self) -> AppResult<Vec<Book>>;
    async fn find_by_id(&self, book_id: BookId) -> AppResult<Option<Book>>;
    // uniqueness pre-check for create/update
    async fn find_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>>;
    // substring match, OR-combined over the provided fields
    async fn search(&self, query: BookSearchQuery) -> AppResult<Vec<Book>>;
    async fn update(&self, event: UpdateBook) -> AppResult<Book>;
    // returns the deleted record
    async fn delete(&self, book_id: BookId) -> AppResult<Book>;
}
