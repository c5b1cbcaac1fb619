use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::Utc;
use rstest::rstest;
use serde_json::json;
use tower::ServiceExt;

use crate::{
    deserialize_json,
    helper::{fixture, make_router, TestRequestExt},
};
use api::model::borrower::{BorrowerListResponse, SingleBorrowerResponse};
use kernel::{
    model::{borrower::Borrower, id::BorrowerId},
    repository::borrower::MockBorrowerRepository,
};
use registry::MockAppRegistryExt;

fn sample_borrower(borrower_id: BorrowerId) -> Borrower {
    Borrower {
        id: borrower_id,
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        registered_date: Utc::now(),
    }
}

#[rstest]
#[tokio::test]
async fn show_borrower_list_returns_every_borrower(
    mut fixture: MockAppRegistryExt,
) -> anyhow::Result<()> {
    let borrower_id = BorrowerId::new();
    fixture.expect_borrower_repository().returning(move || {
        let mut mock = MockBorrowerRepository::new();
        mock.expect_find_all()
            .returning(move || Ok(vec![sample_borrower(borrower_id)]));
        Arc::new(mock)
    });

    let app = make_router(fixture);

    let req = Request::get("/borrowers").body(Body::empty())?;
    let resp = app.oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let result = deserialize_json!(resp, BorrowerListResponse);
    assert_eq!(result.message, "Fetching all borrowers");
    assert_eq!(result.borrowers.len(), 1);
    Ok(())
}

#[rstest]
#[case::valid(
    json!({ "name": "Ada Lovelace", "email": "ada@example.com" }),
    StatusCode::CREATED
)]
#[case::short_name(
    json!({ "name": "Al", "email": "al@example.com" }),
    StatusCode::BAD_REQUEST
)]
#[case::invalid_email(
    json!({ "name": "Ada Lovelace", "email": "not-an-email" }),
    StatusCode::BAD_REQUEST
)]
#[case::missing_email(
    json!({ "name": "Ada Lovelace" }),
    StatusCode::BAD_REQUEST
)]
#[tokio::test]
async fn register_borrower_validates_the_payload(
    mut fixture: MockAppRegistryExt,
    #[case] body: serde_json::Value,
    #[case] status_code: StatusCode,
) -> anyhow::Result<()> {
    fixture.expect_borrower_repository().returning(|| {
        let mut mock = MockBorrowerRepository::new();
        mock.expect_find_by_email().returning(|_| Ok(None));
        mock.expect_create().returning(|event| {
            Ok(Borrower {
                id: BorrowerId::new(),
                name: event.name,
                email: event.email,
                registered_date: event.registered_date,
            })
        });
        Arc::new(mock)
    });

    let app = make_router(fixture);

    let req = Request::post("/borrowers/register").json(body)?;
    let resp = app.oneshot(req).await?;
    assert_eq!(resp.status(), status_code);

    if status_code == StatusCode::CREATED {
        let result = deserialize_json!(resp, SingleBorrowerResponse);
        assert_eq!(result.message, "Borrower created");
        assert_eq!(result.borrower.email, "ada@example.com");
    }
    Ok(())
}

#[rstest]
#[tokio::test]
async fn register_borrower_rejects_duplicate_email(
    mut fixture: MockAppRegistryExt,
) -> anyhow::Result<()> {
    let existing_id = BorrowerId::new();
    fixture.expect_borrower_repository().returning(move || {
        let mut mock = MockBorrowerRepository::new();
        mock.expect_find_by_email()
            .returning(move |_| Ok(Some(sample_borrower(existing_id))));
        Arc::new(mock)
    });

    let app = make_router(fixture);

    let req = Request::post("/borrowers/register").json(json!({
        "name": "Ada Lovelace",
        "email": "ada@example.com"
    }))?;
    let resp = app.oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    Ok(())
}

#[rstest]
#[tokio::test]
async fn show_borrower_returns_404_for_unknown_id(
    mut fixture: MockAppRegistryExt,
) -> anyhow::Result<()> {
    fixture.expect_borrower_repository().returning(|| {
        let mut mock = MockBorrowerRepository::new();
        mock.expect_find_by_id().returning(|_| Ok(None));
        Arc::new(mock)
    });

    let app = make_router(fixture);

    let path = format!("/borrowers/{}", BorrowerId::new());
    let req = Request::get(&path).body(Body::empty())?;
    let resp = app.oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[rstest]
#[tokio::test]
async fn update_borrower_keeps_their_own_email(
    mut fixture: MockAppRegistryExt,
) -> anyhow::Result<()> {
    let borrower_id = BorrowerId::new();
    fixture.expect_borrower_repository().returning(move || {
        let mut mock = MockBorrowerRepository::new();
        mock.expect_find_by_email()
            .returning(move |_| Ok(Some(sample_borrower(borrower_id))));
        mock.expect_update().returning(|event| {
            let mut borrower = sample_borrower(event.borrower_id);
            if let Some(name) = event.name {
                borrower.name = name;
            }
            Ok(borrower)
        });
        Arc::new(mock)
    });

    let app = make_router(fixture);

    let path = format!("/borrowers/{borrower_id}");
    let req = Request::put(&path).json(json!({
        "name": "Ada King",
        "email": "ada@example.com"
    }))?;
    let resp = app.oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let result = deserialize_json!(resp, SingleBorrowerResponse);
    assert_eq!(result.message, "Borrower updated");
    assert_eq!(result.borrower.name, "Ada King");
    Ok(())
}

#[rstest]
#[tokio::test]
async fn delete_borrower_returns_the_deleted_record(
    mut fixture: MockAppRegistryExt,
) -> anyhow::Result<()> {
    let borrower_id = BorrowerId::new();
    fixture.expect_borrower_repository().returning(move || {
        let mut mock = MockBorrowerRepository::new();
        mock.expect_delete()
            .returning(move |id| Ok(sample_borrower(id)));
        Arc::new(mock)
    });

    let app = make_router(fixture);

    let path = format!("/borrowers/{borrower_id}");
    let req = Request::delete(&path).body(Body::empty())?;
    let resp = app.oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let result = deserialize_json!(resp, SingleBorrowerResponse);
    assert_eq!(result.message, "Borrower deleted");
    assert_eq!(result.borrower.id, borrower_id);
    Ok(())
}
