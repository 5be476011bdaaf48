//! HTTP handlers for books and user sessions.

pub mod books;
pub mod users;

use crate::error::AppError;
use axum::extract::rejection::JsonRejection;

/// Malformed or non-JSON bodies become 400 error envelopes.
pub(crate) fn bad_body(rejection: JsonRejection) -> AppError {
    AppError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
}
