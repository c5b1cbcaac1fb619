use crate::{
    extractor::ValidatedJson,
    model::book::{
        BookListResponse, BookSearchParams, CreateBookRequest, SingleBookResponse,
        UpdateBookRequest,
    },
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use kernel::model::id::BookId;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};
use std::str::FromStr;

pub async fn show_book_list(State(registry): State<AppRegistry>) -> AppResult<impl IntoResponse> {
    let books = registry.book_repository().find_all().await?;
    Ok(Json(BookListResponse::new("Fetching all books", books)))
}

pub async fn show_book(
    Path(id): Path<String>,
    State(registry): State<AppRegistry>,
) -> AppResult<impl IntoResponse> {
    let book_id = BookId::from_str(&id)?;
    let book = registry
        .book_repository()
        .find_by_id(book_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("Book not found".into()))?;
    Ok(Json(SingleBookResponse::new("Fetching book by id", book)))
}

pub async fn search_books(
    Query(params): Query<BookSearchParams>,
    State(registry): State<AppRegistry>,
) -> AppResult<impl IntoResponse> {
    let books = registry.book_repository().search(params.into()).await?;
    Ok(Json(BookListResponse::new("Searching books", books)))
}

pub async fn register_book(
    State(registry): State<AppRegistry>,
    ValidatedJson(request): ValidatedJson<CreateBookRequest>,
) -> AppResult<impl IntoResponse> {
    if registry
        .book_repository()
        .find_by_isbn(&request.isbn)
        .await?
        .is_some()
    {
        return Err(AppError::DuplicateIsbn);
    }

    let book = registry.book_repository().create(request.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(SingleBookResponse::new("Book created", book)),
    ))
}

pub async fn update_book(
    Path(id): Path<String>,
    State(registry): State<AppRegistry>,
    ValidatedJson(request): ValidatedJson<UpdateBookRequest>,
) -> AppResult<impl IntoResponse> {
    let book_id = BookId::from_str(&id)?;

    // a book may keep its own ISBN on update
    if let Some(isbn) = &request.isbn {
        if let Some(existing) = registry.book_repository().find_by_isbn(isbn).await? {
            if existing.id != book_id {
                return Err(AppError::DuplicateIsbn);
            }
        }
    }

    let book = registry
        .book_repository()
        .update(request.into_event(book_id))
        .await?;
    Ok(Json(SingleBookResponse::new("Book updated", book)))
}

pub async fn delete_book(
    Path(id): Path<String>,
    State(registry): State<AppRegistry>,
) -> AppResult<impl IntoResponse> {
    let book_id = BookId::from_str(&id)?;
    let book = registry.book_repository().delete(book_id).await?;
    Ok(Json(SingleBookResponse::new("Book deleted", book)))
}
