use crate::handler::borrower::{
    delete_borrower, register_borrower, show_borrower, show_borrower_list, update_borrower,
};
use axum::{
    routing::{get, post},
    Router,
};
use registry::AppRegistry;

pub fn build_borrower_routes() -> Router<AppRegistry> {
    let routers = Router::new()
        .route("/", get(show_borrower_list))
        .route("/register", post(register_borrower))
        .route(
            "/:id",
            get(show_borrower).put(update_borrower).delete(delete_borrower),
        );
    Router::new().nest("/borrowers", routers)
}
