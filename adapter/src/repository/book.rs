use crate::database::{model::book::BookRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    book::{
        event::{CreateBook, UpdateBook},
        Book, BookSearchQuery,
    },
    id::BookId,
};
use kernel::repository::book::BookRepository;
use shared::error::{AppError, AppResult};

const BOOK_COLUMNS: &str = "book_id, title, author, isbn, quantity_available, location";

#[derive(new)]
pub struct BookRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl BookRepository for BookRepositoryImpl {
    async fn create(&self, event: CreateBook) -> AppResult<Book> {
        let book_id = BookId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO books
                (book_id, title, author, isbn, quantity_available, location)
                VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(book_id)
        .bind(&event.title)
        .bind(&event.author)
        .bind(&event.isbn)
        .bind(event.quantity_available)
        .bind(&event.location)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;
        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No book record has been created".into(),
            ));
        }

        Ok(Book {
            id: book_id,
            title: event.title,
            author: event.author,
            isbn: event.isbn,
            quantity_available: event.quantity_available,
            location: event.location,
        })
    }

    async fn find_all(&self) -> AppResult<Vec<Book>> {
        let query = format!("SELECT {BOOK_COLUMNS} FROM books ORDER BY title ASC");
        sqlx::query_as::<_, BookRow>(&query)
            .fetch_all(self.db.inner_ref())
            .await
            .map(|rows| rows.into_iter().map(Book::from).collect())
            .map_err(AppError::SpecificOperationError)
    }

    async fn find_by_id(&self, book_id: BookId) -> AppResult<Option<Book>> {
        let query = format!("SELECT {BOOK_COLUMNS} FROM books WHERE book_id = $1");
        sqlx::query_as::<_, BookRow>(&query)
            .bind(book_id)
            .fetch_optional(self.db.inner_ref())
            .await
            .map(|row| row.map(Book::from))
            .map_err(AppError::SpecificOperationError)
    }

    async fn find_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>> {
        let query = format!("SELECT {BOOK_COLUMNS} FROM books WHERE isbn = $1");
        sqlx::query_as::<_, BookRow>(&query)
            .bind(isbn)
            .fetch_optional(self.db.inner_ref())
            .await
            .map(|row| row.map(Book::from))
            .map_err(AppError::SpecificOperationError)
    }

    async fn search(&self, query: BookSearchQuery) -> AppResult<Vec<Book>> {
        let mut builder =
            sqlx::QueryBuilder::new(format!("SELECT {BOOK_COLUMNS} FROM books"));
        if !query.is_empty() {
            builder.push(" WHERE ");
            let mut predicates = builder.separated(" OR ");
            if let Some(title) = &query.title {
                predicates.push("title ILIKE ");
                predicates.push_bind_unseparated(format!("%{title}%"));
            }
            if let Some(author) = &query.author {
                predicates.push("author ILIKE ");
                predicates.push_bind_unseparated(format!("%{author}%"));
            }
            if let Some(isbn) = &query.isbn {
                predicates.push("isbn ILIKE ");
                predicates.push_bind_unseparated(format!("%{isbn}%"));
            }
        }
        builder.push(" ORDER BY title ASC");

        builder
            .build_query_as::<BookRow>()
            .fetch_all(self.db.inner_ref())
            .await
            .map(|rows| rows.into_iter().map(Book::from).collect())
            .map_err(AppError::SpecificOperationError)
    }

    async fn update(&self, event: UpdateBook) -> AppResult<Book> {
        let mut tx = self.db.begin().await?;

        let query = format!("SELECT {BOOK_COLUMNS} FROM books WHERE book_id = $1 FOR UPDATE");
        let current: Option<BookRow> = sqlx::query_as(&query)
            .bind(event.book_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        let Some(current) = current.map(Book::from) else {
            return Err(AppError::EntityNotFound(format!(
                "Book ({}) not found.",
                event.book_id
            )));
        };

        // absent fields keep their stored values
        let book = Book {
            id: current.id,
            title: event.title.unwrap_or(current.title),
            author: event.author.unwrap_or(current.author),
            isbn: event.isbn.unwrap_or(current.isbn),
            quantity_available: event.quantity_available.unwrap_or(current.quantity_available),
            location: event.location.unwrap_or(current.location),
        };

        let res = sqlx::query(
            r#"
                UPDATE books
                SET title = $2, author = $3, isbn = $4, quantity_available = $5, location = $6
                WHERE book_id = $1
            "#,
        )
        .bind(book.id)
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.isbn)
        .bind(book.quantity_available)
        .bind(&book.location)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;
        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No book record has been updated".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(book)
    }

    async fn delete(&self, book_id: BookId) -> AppResult<Book> {
        let mut tx = self.db.begin().await?;

        let query = format!("SELECT {BOOK_COLUMNS} FROM books WHERE book_id = $1");
        let book: Option<BookRow> = sqlx::query_as(&query)
            .bind(book_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        let Some(book) = book.map(Book::from) else {
            return Err(AppError::EntityNotFound(format!(
                "Book ({book_id}) not found."
            )));
        };

        let res = sqlx::query("DELETE FROM books WHERE book_id = $1")
            .bind(book_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No book record has been deleted".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(book)
    }
}
