use chrono::{DateTime, Utc};
use kernel::model::{
    book::BookSummary,
    borrow::{Borrow, BorrowedBook},
    id::{BookId, BorrowId, BorrowerId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DueBooksParams {
    pub borrower_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSummaryResponse {
    pub title: String,
    pub author: String,
    pub isbn: String,
}

impl From<BookSummary> for BookSummaryResponse {
    fn from(summary: BookSummary) -> Self {
        let BookSummary {
            title,
            author,
            isbn,
        } = summary;
        Self {
            title,
            author,
            isbn,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowResponse {
    pub id: BorrowId,
    pub book_id: BookId,
    pub borrower_id: BorrowerId,
    pub borrow_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
}

impl From<Borrow> for BorrowResponse {
    fn from(borrow: Borrow) -> Self {
        let Borrow {
            id,
            book_id,
            borrower_id,
            borrowed_at,
            due_date,
            returned_at,
        } = borrow;
        Self {
            id,
            book_id,
            borrower_id,
            borrow_date: borrowed_at,
            due_date,
            return_date: returned_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowedBookResponse {
    pub id: BorrowId,
    pub book_id: BookId,
    pub borrower_id: BorrowerId,
    pub borrow_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
    pub book: BookSummaryResponse,
}

impl From<BorrowedBook> for BorrowedBookResponse {
    fn from(borrowed: BorrowedBook) -> Self {
        let BorrowedBook {
            id,
            book_id,
            borrower_id,
            borrowed_at,
            due_date,
            returned_at,
            book,
        } = borrowed;
        Self {
            id,
            book_id,
            borrower_id,
            borrow_date: borrowed_at,
            due_date,
            return_date: returned_at,
            book: book.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BorrowListResponse {
    pub message: String,
    pub borrows: Vec<BorrowedBookResponse>,
}

impl BorrowListResponse {
    pub fn new(message: impl Into<String>, borrows: Vec<BorrowedBook>) -> Self {
        Self {
            message: message.into(),
            borrows: borrows.into_iter().map(BorrowedBookResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SingleBorrowResponse {
    pub message: String,
    pub borrow: BorrowResponse,
}

impl SingleBorrowResponse {
    pub fn new(message: impl Into<String>, borrow: Borrow) -> Self {
        Self {
            message: message.into(),
            borrow: borrow.into(),
        }
    }
}
