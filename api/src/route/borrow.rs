use crate::handler::{
    borrow::{
        borrow_book, return_book, show_borrowed_by_borrower, show_borrowed_last_month,
        show_borrowed_list, show_due_books, show_due_books_last_month,
    },
    report::generate_report,
};
use axum::{
    routing::{get, post},
    Router,
};
use registry::AppRegistry;

pub fn build_borrow_routes() -> Router<AppRegistry> {
    let routers = Router::new()
        .route("/lastMonth", get(show_borrowed_last_month))
        .route("/", get(show_borrowed_list))
        .route("/due/lastMonth", get(show_due_books_last_month))
        .route("/due", get(show_due_books))
        .route("/report", post(generate_report))
        .route("/:borrower_id", get(show_borrowed_by_borrower))
        .route("/:borrower_id/:book_id", post(borrow_book))
        .route("/return/:borrower_id/:book_id", post(return_book));
    Router::new().nest("/borrows", routers)
}
