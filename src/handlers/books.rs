//! Book handlers: list, read, create, update, soft delete.

use super::bad_body;
use crate::error::AppError;
use crate::extractors::Authenticated;
use crate::models::NewBook;
use crate::response::{success, success_empty};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};

fn parse_id(raw: &str) -> Result<i64, AppError> {
    let id: i64 = raw
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid ID".into()))?;
    match id {
        0 => Err(AppError::BadRequest("ID is required".into())),
        n if n < 0 => Err(AppError::BadRequest("Invalid ID".into())),
        n => Ok(n),
    }
}

fn validate_book_input(book: &NewBook) -> Result<(), AppError> {
    if book.title.trim().is_empty() || book.author.trim().is_empty() {
        return Err(AppError::BadRequest("title and author are required".into()));
    }
    Ok(())
}

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let books = state.books.list_books().await?;
    Ok(success("Books fetched successfully", books))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;
    let book = state.books.get_book(id).await?;
    Ok(success("Book fetched successfully", book))
}

pub async fn create(
    Authenticated(user): Authenticated,
    State(state): State<AppState>,
    payload: Result<Json<NewBook>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(book) = payload.map_err(bad_body)?;
    validate_book_input(&book)?;
    let book = state.books.create_book(book).await?;
    tracing::info!(user = %user.email, book_id = book.id, "book created");
    Ok(success("Book created successfully", book))
}

pub async fn update(
    Authenticated(user): Authenticated,
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<NewBook>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;
    let Json(mut book) = payload.map_err(bad_body)?;
    validate_book_input(&book)?;
    book.id = Some(id);
    let book = state.books.update_book(id, book).await?;
    tracing::info!(user = %user.email, book_id = id, "book updated");
    Ok(success("Book updated successfully", book))
}

pub async fn delete(
    Authenticated(user): Authenticated,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;
    state.books.delete_book(id).await?;
    tracing::info!(user = %user.email, book_id = id, "book deleted");
    Ok(success_empty("Book deleted successfully"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_parsing() {
        assert_eq!(parse_id("42"), Ok(42));
        assert_eq!(parse_id("0"), Err(AppError::BadRequest("ID is required".into())));
        assert_eq!(parse_id("-3"), Err(AppError::BadRequest("Invalid ID".into())));
        assert_eq!(parse_id("abc"), Err(AppError::BadRequest("Invalid ID".into())));
    }
}
