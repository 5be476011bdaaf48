//! Book service.

use super::validation::{require_book_fields, require_id};
use crate::error::AppError;
use crate::models::{Book, NewBook};
use crate::store::BookRepository;
use std::sync::Arc;

#[derive(Clone)]
pub struct BookService {
    repository: Arc<dyn BookRepository>,
}

impl BookService {
    pub fn new(repository: Arc<dyn BookRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_books(&self) -> Result<Vec<Book>, AppError> {
        Ok(self.repository.list_active().await?)
    }

    pub async fn get_book(&self, id: i64) -> Result<Book, AppError> {
        require_id(id)?;
        Ok(self.repository.get_by_id(id).await?)
    }

    pub async fn create_book(&self, book: NewBook) -> Result<Book, AppError> {
        require_book_fields(&book)?;
        Ok(self.repository.create(book).await?)
    }

    pub async fn update_book(&self, id: i64, book: NewBook) -> Result<Book, AppError> {
        require_id(id)?;
        require_book_fields(&book)?;
        Ok(self.repository.update(id, book).await?)
    }

    pub async fn delete_book(&self, id: i64) -> Result<(), AppError> {
        require_id(id)?;
        Ok(self.repository.soft_delete(id).await?)
    }

    /// Readiness of the underlying store.
    pub async fn ping(&self) -> Result<(), AppError> {
        Ok(self.repository.ping().await?)
    }
}
