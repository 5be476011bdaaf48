//! Service-side input rules. Handlers run their own checks first; these hold
//! for callers that reach the services without going through HTTP.

use crate::error::AppError;
use crate::models::NewBook;

pub(crate) fn require_book_fields(book: &NewBook) -> Result<(), AppError> {
    if book.title.trim().is_empty() || book.author.trim().is_empty() {
        return Err(AppError::BadRequest("title and author are required".into()));
    }
    Ok(())
}

pub(crate) fn require_id(id: i64) -> Result<(), AppError> {
    if id <= 0 {
        return Err(AppError::BadRequest("ID is required".into()));
    }
    Ok(())
}

pub(crate) fn require_credentials(email: &str, password: &str) -> Result<(), AppError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(AppError::BadRequest("Email and password are required".into()));
    }
    Ok(())
}

pub(crate) fn require_token(token: &str) -> Result<(), AppError> {
    if token.trim().is_empty() {
        return Err(AppError::unauthorized());
    }
    Ok(())
}
