use chrono::{DateTime, Utc};
use kernel::model::{
    book::BookSummary,
    borrow::{Borrow, BorrowedBook, ReportEntry},
    borrower::BorrowerSummary,
    id::{BookId, BorrowId, BorrowerId},
};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BorrowRow {
    pub borrow_id: BorrowId,
    pub book_id: BookId,
    pub borrower_id: BorrowerId,
    pub borrowed_at: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub returned_at: Option<DateTime<Utc>>,
}

impl From<BorrowRow> for Borrow {
    fn from(row: BorrowRow) -> Self {
        let BorrowRow {
            borrow_id,
            book_id,
            borrower_id,
            borrowed_at,
            due_date,
            returned_at,
        } = row;
        Self {
            id: borrow_id,
            book_id,
            borrower_id,
            borrowed_at,
            due_date,
            returned_at,
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BorrowedBookRow {
    pub borrow_id: BorrowId,
    pub book_id: BookId,
    pub borrower_id: BorrowerId,
    pub borrowed_at: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub returned_at: Option<DateTime<Utc>>,
    pub title: String,
    pub author: String,
    pub isbn: String,
}

impl From<BorrowedBookRow> for BorrowedBook {
    fn from(row: BorrowedBookRow) -> Self {
        let BorrowedBookRow {
            borrow_id,
            book_id,
            borrower_id,
            borrowed_at,
            due_date,
            returned_at,
            title,
            author,
            isbn,
        } = row;
        Self {
            id: borrow_id,
            book_id,
            borrower_id,
            borrowed_at,
            due_date,
            returned_at,
            book: BookSummary {
                title,
                author,
                isbn,
            },
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReportRow {
    pub borrow_id: BorrowId,
    pub borrowed_at: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub returned_at: Option<DateTime<Utc>>,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub name: String,
    pub email: String,
}

impl From<ReportRow> for ReportEntry {
    fn from(row: ReportRow) -> Self {
        let ReportRow {
            borrow_id,
            borrowed_at,
            due_date,
            returned_at,
            title,
            author,
            isbn,
            name,
            email,
        } = row;
        Self {
            id: borrow_id,
            borrowed_at,
            due_date,
            returned_at,
            book: BookSummary {
                title,
                author,
                isbn,
            },
            borrower: BorrowerSummary { name, email },
        }
    }
}
