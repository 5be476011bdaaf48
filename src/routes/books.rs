//! Book routes. Reads are public; writes go through the bearer gate.

use crate::handlers::books;
use crate::state::AppState;
use axum::{routing::get, Router};

/// GET/POST /book, GET/PUT/DELETE /book/:id.
pub fn book_routes(state: AppState) -> Router {
    Router::new()
        .route("/book", get(books::list).post(books::create))
        .route(
            "/book/:id",
            get(books::read).put(books::update).delete(books::delete),
        )
        .with_state(state)
}
