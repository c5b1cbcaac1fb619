use crate::handler::book::{
    delete_book, register_book, search_books, show_book, show_book_list, update_book,
};
use axum::{routing::get, Router};
use registry::AppRegistry;

pub fn build_book_routes() -> Router<AppRegistry> {
    let routers = Router::new()
        .route("/search", get(search_books))
        .route("/", get(show_book_list).post(register_book))
        .route(
            "/:id",
            get(show_book).put(update_book).delete(delete_book),
        );
    Router::new().nest("/books", routers)
}
