use garde::Validate;
use kernel::model::{
    book::{
        event::{CreateBook, UpdateBook},
        Book, BookSearchQuery,
    },
    id::BookId,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookRequest {
    #[garde(length(min = 1, max = 256))]
    pub title: String,
    #[garde(length(min = 1, max = 256))]
    pub author: String,
    #[garde(range(min = 0))]
    pub quantity_available: i32,
    #[garde(length(min = 8, max = 18))]
    pub isbn: String,
    #[garde(length(min = 1, max = 256))]
    pub location: String,
}

impl From<CreateBookRequest> for CreateBook {
    fn from(request: CreateBookRequest) -> Self {
        let CreateBookRequest {
            title,
            author,
            quantity_available,
            isbn,
            location,
        } = request;
        Self {
            title,
            author,
            isbn,
            quantity_available,
            location,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookRequest {
    #[garde(inner(length(min = 1, max = 256)))]
    pub title: Option<String>,
    #[garde(inner(length(min = 1, max = 256)))]
    pub author: Option<String>,
    #[garde(inner(range(min = 0)))]
    pub quantity_available: Option<i32>,
    #[garde(inner(length(min = 8, max = 18)))]
    pub isbn: Option<String>,
    #[garde(inner(length(min = 1, max = 256)))]
    pub location: Option<String>,
}

impl UpdateBookRequest {
    pub fn into_event(self, book_id: BookId) -> UpdateBook {
        let UpdateBookRequest {
            title,
            author,
            quantity_available,
            isbn,
            location,
        } = self;
        UpdateBook {
            book_id,
            title,
            author,
            isbn,
            quantity_available,
            location,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct BookSearchParams {
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
}

impl From<BookSearchParams> for BookSearchQuery {
    fn from(params: BookSearchParams) -> Self {
        // empty strings contribute no predicate, same as absent parameters
        fn provided(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.is_empty())
        }
        Self {
            title: provided(params.title),
            author: provided(params.author),
            isbn: provided(params.isbn),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub quantity_available: i32,
    pub location: String,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        let Book {
            id,
            title,
            author,
            isbn,
            quantity_available,
            location,
        } = book;
        Self {
            id,
            title,
            author,
            isbn,
            quantity_available,
            location,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookListResponse {
    pub message: String,
    pub books: Vec<BookResponse>,
}

impl BookListResponse {
    pub fn new(message: impl Into<String>, books: Vec<Book>) -> Self {
        Self {
            message: message.into(),
            books: books.into_iter().map(BookResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SingleBookResponse {
    pub message: String,
    pub book: BookResponse,
}

impl SingleBookResponse {
    pub fn new(message: impl Into<String>, book: Book) -> Self {
        Self {
            message: message.into(),
            book: book.into(),
        }
    }
}
