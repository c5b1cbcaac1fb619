use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{Duration, Utc};
use rstest::rstest;
use tower::ServiceExt;

use crate::{
    deserialize_json,
    helper::{fixture, make_router},
};
use api::model::borrow::{BorrowListResponse, SingleBorrowResponse};
use kernel::{
    model::{
        book::BookSummary,
        borrow::{event::LOAN_PERIOD_DAYS, Borrow, BorrowedBook},
        id::{BookId, BorrowId, BorrowerId},
    },
    repository::borrow::MockBorrowRepository,
};
use registry::MockAppRegistryExt;
use shared::error::AppError;

fn outstanding_loan(borrower_id: BorrowerId) -> BorrowedBook {
    let borrowed_at = Utc::now() - Duration::days(7);
    BorrowedBook {
        id: BorrowId::new(),
        book_id: BookId::new(),
        borrower_id,
        borrowed_at,
        due_date: borrowed_at + Duration::days(LOAN_PERIOD_DAYS),
        returned_at: None,
        book: BookSummary {
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            isbn: "9780441172719".to_string(),
        },
    }
}

#[rstest]
#[tokio::test]
async fn borrow_book_creates_a_loan_with_a_fourteen_day_period(
    mut fixture: MockAppRegistryExt,
) -> anyhow::Result<()> {
    fixture.expect_borrow_repository().returning(|| {
        let mut mock = MockBorrowRepository::new();
        mock.expect_borrow_book().returning(|event| {
            Ok(Borrow {
                id: BorrowId::new(),
                book_id: event.book_id,
                borrower_id: event.borrower_id,
                borrowed_at: event.borrowed_at,
                due_date: event.due_date,
                returned_at: None,
            })
        });
        Arc::new(mock)
    });

    let app = make_router(fixture);

    let path = format!("/borrows/{}/{}", BorrowerId::new(), BookId::new());
    let req = Request::post(&path).body(Body::empty())?;
    let resp = app.oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let result = deserialize_json!(resp, SingleBorrowResponse);
    assert_eq!(result.message, "Book borrowed successfully.");
    assert!(result.borrow.return_date.is_none());
    assert_eq!(
        result.borrow.due_date - result.borrow.borrow_date,
        Duration::days(LOAN_PERIOD_DAYS)
    );
    Ok(())
}

#[rstest]
#[tokio::test]
async fn borrow_book_fails_when_no_copies_are_available(
    mut fixture: MockAppRegistryExt,
) -> anyhow::Result<()> {
    fixture.expect_borrow_repository().returning(|| {
        let mut mock = MockBorrowRepository::new();
        mock.expect_borrow_book()
            .returning(|_| Err(AppError::BookUnavailable));
        Arc::new(mock)
    });

    let app = make_router(fixture);

    let path = format!("/borrows/{}/{}", BorrowerId::new(), BookId::new());
    let req = Request::post(&path).body(Body::empty())?;
    let resp = app.oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[rstest]
#[tokio::test]
async fn borrow_book_fails_when_the_book_does_not_exist(
    mut fixture: MockAppRegistryExt,
) -> anyhow::Result<()> {
    fixture.expect_borrow_repository().returning(|| {
        let mut mock = MockBorrowRepository::new();
        mock.expect_borrow_book()
            .returning(|event| Err(AppError::EntityNotFound(format!(
                "Book ({}) not found.",
                event.book_id
            ))));
        Arc::new(mock)
    });

    let app = make_router(fixture);

    let path = format!("/borrows/{}/{}", BorrowerId::new(), BookId::new());
    let req = Request::post(&path).body(Body::empty())?;
    let resp = app.oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[rstest]
#[tokio::test]
async fn return_book_stamps_the_return_date(
    mut fixture: MockAppRegistryExt,
) -> anyhow::Result<()> {
    fixture.expect_borrow_repository().returning(|| {
        let mut mock = MockBorrowRepository::new();
        mock.expect_return_book().returning(|event| {
            let borrowed_at = event.returned_at - Duration::days(7);
            Ok(Borrow {
                id: BorrowId::new(),
                book_id: event.book_id,
                borrower_id: event.borrower_id,
                borrowed_at,
                due_date: borrowed_at + Duration::days(LOAN_PERIOD_DAYS),
                returned_at: Some(event.returned_at),
            })
        });
        Arc::new(mock)
    });

    let app = make_router(fixture);

    let path = format!("/borrows/return/{}/{}", BorrowerId::new(), BookId::new());
    let req = Request::post(&path).body(Body::empty())?;
    let resp = app.oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let result = deserialize_json!(resp, SingleBorrowResponse);
    assert_eq!(result.message, "Book returned successfully.");
    assert!(result.borrow.return_date.is_some());
    Ok(())
}

#[rstest]
#[tokio::test]
async fn return_book_fails_without_an_outstanding_loan(
    mut fixture: MockAppRegistryExt,
) -> anyhow::Result<()> {
    fixture.expect_borrow_repository().returning(|| {
        let mut mock = MockBorrowRepository::new();
        mock.expect_return_book()
            .returning(|_| Err(AppError::EntityNotFound("Borrow record not found.".into())));
        Arc::new(mock)
    });

    let app = make_router(fixture);

    let path = format!("/borrows/return/{}/{}", BorrowerId::new(), BookId::new());
    let req = Request::post(&path).body(Body::empty())?;
    let resp = app.oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[rstest]
#[tokio::test]
async fn show_borrowed_list_returns_outstanding_loans(
    mut fixture: MockAppRegistryExt,
) -> anyhow::Result<()> {
    let borrower_id = BorrowerId::new();
    fixture.expect_borrow_repository().returning(move || {
        let mut mock = MockBorrowRepository::new();
        mock.expect_find_unreturned_all()
            .returning(move || Ok(vec![outstanding_loan(borrower_id)]));
        Arc::new(mock)
    });

    let app = make_router(fixture);

    let req = Request::get("/borrows").body(Body::empty())?;
    let resp = app.oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let result = deserialize_json!(resp, BorrowListResponse);
    assert_eq!(result.message, "Fetching all borrowed books");
    assert_eq!(result.borrows.len(), 1);
    assert_eq!(result.borrows[0].book.title, "Dune");
    Ok(())
}

#[rstest]
#[tokio::test]
async fn show_borrowed_by_borrower_filters_on_the_path_id(
    mut fixture: MockAppRegistryExt,
) -> anyhow::Result<()> {
    let borrower_id = BorrowerId::new();
    fixture.expect_borrow_repository().returning(move || {
        let mut mock = MockBorrowRepository::new();
        mock.expect_find_unreturned_by_borrower()
            .withf(move |id| *id == borrower_id)
            .returning(move |id| Ok(vec![outstanding_loan(id)]));
        Arc::new(mock)
    });

    let app = make_router(fixture);

    let path = format!("/borrows/{borrower_id}");
    let req = Request::get(&path).body(Body::empty())?;
    let resp = app.oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let result = deserialize_json!(resp, BorrowListResponse);
    assert_eq!(result.message, "Fetching borrowed books");
    assert_eq!(result.borrows[0].borrower_id, borrower_id);
    Ok(())
}

#[rstest]
#[tokio::test]
async fn last_month_listing_queries_an_open_window(
    mut fixture: MockAppRegistryExt,
) -> anyhow::Result<()> {
    fixture.expect_borrow_repository().returning(|| {
        let mut mock = MockBorrowRepository::new();
        mock.expect_find_borrowed_in()
            .withf(|window| window.after < window.before)
            .returning(|_| Ok(vec![]));
        Arc::new(mock)
    });

    let app = make_router(fixture);

    let req = Request::get("/borrows/lastMonth").body(Body::empty())?;
    let resp = app.oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let result = deserialize_json!(resp, BorrowListResponse);
    assert_eq!(result.message, "Fetching all borrow processes last month");
    Ok(())
}

// The unfiltered due listing must include everything the per-borrower
// listing returns for the same dataset.
#[rstest]
#[tokio::test]
async fn due_books_without_filter_is_a_superset_of_any_filtered_listing(
    mut fixture: MockAppRegistryExt,
) -> anyhow::Result<()> {
    let target = BorrowerId::new();
    let other = BorrowerId::new();
    let dataset = vec![outstanding_loan(target), outstanding_loan(other)];

    fixture.expect_borrow_repository().returning(move || {
        let dataset = dataset.clone();
        let mut mock = MockBorrowRepository::new();
        mock.expect_find_due().returning(move |_, borrower_id| {
            Ok(dataset
                .iter()
                .filter(|loan| borrower_id.map_or(true, |id| loan.borrower_id == id))
                .cloned()
                .collect())
        });
        Arc::new(mock)
    });

    let app = make_router(fixture);

    let req = Request::get("/borrows/due").body(Body::empty())?;
    let resp = app.clone().oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let all = deserialize_json!(resp, BorrowListResponse);
    assert_eq!(all.message, "All due books");

    let path = format!("/borrows/due?borrowerId={target}");
    let req = Request::get(&path).body(Body::empty())?;
    let resp = app.oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let filtered = deserialize_json!(resp, BorrowListResponse);

    assert!(!filtered.borrows.is_empty());
    for loan in &filtered.borrows {
        assert!(all.borrows.iter().any(|candidate| candidate.id == loan.id));
    }
    Ok(())
}

#[rstest]
#[tokio::test]
async fn due_books_last_month_queries_an_open_window(
    mut fixture: MockAppRegistryExt,
) -> anyhow::Result<()> {
    fixture.expect_borrow_repository().returning(|| {
        let mut mock = MockBorrowRepository::new();
        mock.expect_find_due_in()
            .withf(|window| window.after < window.before)
            .returning(|_| Ok(vec![]));
        Arc::new(mock)
    });

    let app = make_router(fixture);

    let req = Request::get("/borrows/due/lastMonth").body(Body::empty())?;
    let resp = app.oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let result = deserialize_json!(resp, BorrowListResponse);
    assert_eq!(result.message, "All due books last month");
    Ok(())
}
