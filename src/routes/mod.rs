//! Router assembly.

mod books;
mod common;
mod users;

pub use books::book_routes;
pub use common::common_routes;
pub use users::user_routes;

use crate::response::error_body;
use crate::state::AppState;
use axum::{http::StatusCode, response::IntoResponse, Json, Router};
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(error_body(StatusCode::NOT_FOUND, "Route not found")),
    )
}

/// Full application: book, user and common routes with request tracing and a
/// body size cap. Unknown paths answer with a 404 error envelope.
pub fn app(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(book_routes(state.clone()))
        .merge(user_routes(state))
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(max_body_bytes)),
        )
}
