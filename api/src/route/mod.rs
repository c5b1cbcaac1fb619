use crate::{
    middleware::{rate_limit, RateLimiter},
    model::{ErrorResponse, MessageResponse},
};
use axum::{http::StatusCode, middleware::from_fn_with_state, routing::get, Json, Router};
use registry::AppRegistry;

pub mod book;
pub mod borrow;
pub mod borrower;
pub mod health;

pub fn routes(limiter: RateLimiter) -> Router<AppRegistry> {
    // the mutating subtrees share one throttling policy
    let throttled = Router::new()
        .merge(book::build_book_routes())
        .merge(borrower::build_borrower_routes())
        .merge(borrow::build_borrow_routes())
        .layer(from_fn_with_state(limiter, rate_limit));

    Router::new()
        .route("/", get(welcome))
        .merge(health::build_health_check_routes())
        .merge(throttled)
        .fallback(not_found)
}

async fn welcome() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Welcome to the library!".into(),
    })
}

async fn not_found() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Page not found".into(),
        }),
    )
}
