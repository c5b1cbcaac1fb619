use crate::model::borrow::{BorrowListResponse, DueBooksParams, SingleBorrowResponse};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use kernel::model::{
    borrow::{
        event::{CreateBorrow, ReturnBorrow},
        BorrowWindow,
    },
    id::{BookId, BorrowerId},
};
use registry::AppRegistry;
use shared::error::AppResult;
use std::str::FromStr;

pub async fn borrow_book(
    Path((borrower_id, book_id)): Path<(String, String)>,
    State(registry): State<AppRegistry>,
) -> AppResult<impl IntoResponse> {
    let borrower_id = BorrowerId::from_str(&borrower_id)?;
    let book_id = BookId::from_str(&book_id)?;

    let event = CreateBorrow::new(book_id, borrower_id, Utc::now());
    let borrow = registry.borrow_repository().borrow_book(event).await?;
    Ok((
        StatusCode::CREATED,
        Json(SingleBorrowResponse::new(
            "Book borrowed successfully.",
            borrow,
        )),
    ))
}

pub async fn return_book(
    Path((borrower_id, book_id)): Path<(String, String)>,
    State(registry): State<AppRegistry>,
) -> AppResult<impl IntoResponse> {
    let borrower_id = BorrowerId::from_str(&borrower_id)?;
    let book_id = BookId::from_str(&book_id)?;

    let event = ReturnBorrow::new(book_id, borrower_id, Utc::now());
    let borrow = registry.borrow_repository().return_book(event).await?;
    Ok(Json(SingleBorrowResponse::new(
        "Book returned successfully.",
        borrow,
    )))
}

pub async fn show_borrowed_list(
    State(registry): State<AppRegistry>,
) -> AppResult<impl IntoResponse> {
    let borrows = registry.borrow_repository().find_unreturned_all().await?;
    Ok(Json(BorrowListResponse::new(
        "Fetching all borrowed books",
        borrows,
    )))
}

pub async fn show_borrowed_by_borrower(
    Path(borrower_id): Path<String>,
    State(registry): State<AppRegistry>,
) -> AppResult<impl IntoResponse> {
    let borrower_id = BorrowerId::from_str(&borrower_id)?;
    let borrows = registry
        .borrow_repository()
        .find_unreturned_by_borrower(borrower_id)
        .await?;
    Ok(Json(BorrowListResponse::new(
        "Fetching borrowed books",
        borrows,
    )))
}

pub async fn show_borrowed_last_month(
    State(registry): State<AppRegistry>,
) -> AppResult<impl IntoResponse> {
    let window = BorrowWindow::last_month(Utc::now());
    let borrows = registry.borrow_repository().find_borrowed_in(window).await?;
    Ok(Json(BorrowListResponse::new(
        "Fetching all borrow processes last month",
        borrows,
    )))
}

pub async fn show_due_books(
    Query(params): Query<DueBooksParams>,
    State(registry): State<AppRegistry>,
) -> AppResult<impl IntoResponse> {
    let borrower_id = params
        .borrower_id
        .as_deref()
        .map(BorrowerId::from_str)
        .transpose()?;
    let borrows = registry
        .borrow_repository()
        .find_due(Utc::now(), borrower_id)
        .await?;
    Ok(Json(BorrowListResponse::new("All due books", borrows)))
}

pub async fn show_due_books_last_month(
    State(registry): State<AppRegistry>,
) -> AppResult<impl IntoResponse> {
    let window = BorrowWindow::last_month(Utc::now());
    let borrows = registry.borrow_repository().find_due_in(window).await?;
    Ok(Json(BorrowListResponse::new(
        "All due books last month",
        borrows,
    )))
}
