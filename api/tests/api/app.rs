use crate::{
    deserialize_json,
    helper::{fixture, make_router, make_router_with_limits},
    response_text,
};
use api::model::{ErrorResponse, MessageResponse};
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use kernel::repository::book::MockBookRepository;
use registry::MockAppRegistryExt;
use rstest::rstest;
use shared::config::RateLimitConfig;
use std::sync::Arc;
use tower::ServiceExt;

#[rstest]
#[tokio::test]
async fn root_greets_visitors(fixture: MockAppRegistryExt) -> anyhow::Result<()> {
    let app = make_router(fixture);

    let req = Request::get("/").body(Body::empty())?;
    let resp = app.oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let result = deserialize_json!(resp, MessageResponse);
    assert_eq!(result.message, "Welcome to the library!");
    Ok(())
}

#[rstest]
#[tokio::test]
async fn unmatched_routes_return_a_json_404(fixture: MockAppRegistryExt) -> anyhow::Result<()> {
    let app = make_router(fixture);

    let req = Request::get("/no/such/route").body(Body::empty())?;
    let resp = app.oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let result = deserialize_json!(resp, ErrorResponse);
    assert_eq!(result.error, "Page not found");
    Ok(())
}

#[rstest]
#[tokio::test]
async fn mutating_routes_are_rate_limited(mut fixture: MockAppRegistryExt) -> anyhow::Result<()> {
    fixture.expect_book_repository().returning(|| {
        let mut mock = MockBookRepository::new();
        mock.expect_find_all().returning(|| Ok(vec![]));
        Arc::new(mock)
    });
    let app = make_router_with_limits(
        fixture,
        RateLimitConfig {
            max_requests: 2,
            window_secs: 3600,
        },
    );

    for _ in 0..2 {
        let req = Request::get("/books").body(Body::empty())?;
        let resp = app.clone().oneshot(req).await?;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let req = Request::get("/books").body(Body::empty())?;
    let resp = app.oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);

    let text = response_text!(resp);
    assert_eq!(
        text,
        "Too many requests from this IP, please try again later."
    );
    Ok(())
}

#[rstest]
#[tokio::test]
async fn health_routes_are_not_rate_limited(fixture: MockAppRegistryExt) -> anyhow::Result<()> {
    let app = make_router_with_limits(
        fixture,
        RateLimitConfig {
            max_requests: 1,
            window_secs: 3600,
        },
    );

    for _ in 0..3 {
        let req = Request::get("/health").body(Body::empty())?;
        let resp = app.clone().oneshot(req).await?;
        assert_eq!(resp.status(), StatusCode::OK);
    }
    Ok(())
}
