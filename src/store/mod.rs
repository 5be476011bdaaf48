//! Repositories: book persistence and identity-provider access.
//!
//! Each concern is a trait with interchangeable backends chosen when the
//! application state is built: PostgreSQL (`postgres`), a hosted
//! backend-as-a-service (`hosted`) and an in-process store (`memory`).

mod hosted;
mod memory;
mod postgres;

pub use hosted::{HostedAuthRepository, HostedBookRepository, HostedClient};
pub use memory::{MemoryAuthRepository, MemoryBookRepository};
pub use postgres::PgBookRepository;

use crate::models::{Book, NewBook, Session, UserProfile};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("unauthorized")]
    Unauthorized,
    /// The provider refused the password grant.
    #[error("invalid credentials ({status}): {message}")]
    InvalidCredentials { status: u16, message: String },
    #[error("database: {0}")]
    Database(#[from] sqlx::Error),
    #[error("provider request: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider ({status}): {message}")]
    Provider { status: u16, message: String },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Book persistence with soft-delete visibility.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// All rows whose `deleted_at` is unset.
    async fn list_active(&self) -> StoreResult<Vec<Book>>;

    /// One active row; soft-deleted and missing rows are `NotFound`.
    async fn get_by_id(&self, id: i64) -> StoreResult<Book>;

    /// Insert a row. The datastore assigns the id.
    async fn create(&self, book: NewBook) -> StoreResult<Book>;

    /// Replace title, author and published date of an active row.
    async fn update(&self, id: i64, book: NewBook) -> StoreResult<Book>;

    /// Stamp `deleted_at`. A second call on the same id is `NotFound`.
    async fn soft_delete(&self, id: i64) -> StoreResult<()>;

    /// Cheap round trip used by the readiness probe.
    async fn ping(&self) -> StoreResult<()>;
}

/// Identity provider access. The service holds no sessions of its own.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// Create the account only.
    async fn register(&self, email: &str, password: &str) -> StoreResult<()>;

    async fn sign_in(&self, email: &str, password: &str) -> StoreResult<Session>;

    async fn sign_out(&self, token: &str) -> StoreResult<()>;

    async fn get_user(&self, token: &str) -> StoreResult<UserProfile>;

    /// Create the account, then sign in with the same credentials. A refused
    /// sign-in after a successful registration is a provider failure, not a
    /// credentials mismatch.
    async fn sign_up(&self, email: &str, password: &str) -> StoreResult<Session> {
        self.register(email, password).await?;
        self.sign_in(email, password).await.map_err(|err| match err {
            StoreError::InvalidCredentials { status, message } => {
                StoreError::Provider { status, message }
            }
            other => other,
        })
    }
}

/// Trim every field and require title and author.
pub(crate) fn prepare_book(book: &NewBook) -> StoreResult<NewBook> {
    let book = book.trimmed();
    if book.title.is_empty() || book.author.is_empty() {
        return Err(StoreError::Validation("title and author are required".into()));
    }
    Ok(book)
}

pub(crate) fn check_id(id: i64) -> StoreResult<()> {
    if id <= 0 {
        return Err(StoreError::Validation("ID is required".into()));
    }
    Ok(())
}

pub(crate) fn check_credentials(email: &str, password: &str) -> StoreResult<()> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(StoreError::Validation("email and password are required".into()));
    }
    Ok(())
}

pub(crate) fn check_token(token: &str) -> StoreResult<()> {
    if token.trim().is_empty() {
        return Err(StoreError::Unauthorized);
    }
    Ok(())
}

pub(crate) fn book_not_found(id: i64) -> StoreError {
    StoreError::NotFound(format!("book {} not found", id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepare_book_trims_before_checking() {
        let book = prepare_book(&NewBook::new("  Dune ", " Herbert", " 1965-01-01 ")).unwrap();
        assert_eq!(book, NewBook::new("Dune", "Herbert", "1965-01-01"));

        let blank = prepare_book(&NewBook::new("   ", "Herbert", ""));
        assert!(matches!(blank, Err(StoreError::Validation(_))));
    }

    #[test]
    fn non_positive_ids_are_rejected() {
        assert!(check_id(1).is_ok());
        assert!(matches!(check_id(0), Err(StoreError::Validation(_))));
        assert!(matches!(check_id(-4), Err(StoreError::Validation(_))));
    }
}
