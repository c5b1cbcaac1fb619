use kernel::model::{book::Book, id::BookId};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BookRow {
    pub book_id: BookId,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub quantity_available: i32,
    pub location: String,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        let BookRow {
            book_id,
            title,
            author,
            isbn,
            quantity_available,
            location,
        } = row;
        Self {
            id: book_id,
            title,
            author,
            isbn,
            quantity_available,
            location,
        }
    }
}
