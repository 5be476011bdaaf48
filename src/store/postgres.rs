//! Book repository over PostgreSQL.

use super::{book_not_found, check_id, prepare_book, BookRepository, StoreResult};
use crate::migration::BOOKS_TABLE;
use crate::models::{Book, NewBook};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

const COLUMNS: &str = "id, title, author, published_date, created_at, updated_at, deleted_at";

#[derive(Clone)]
pub struct PgBookRepository {
    pool: PgPool,
}

impl PgBookRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookRepository for PgBookRepository {
    async fn list_active(&self) -> StoreResult<Vec<Book>> {
        let sql = format!("SELECT {} FROM {} WHERE deleted_at IS NULL", COLUMNS, BOOKS_TABLE);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Book>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<Book> {
        check_id(id)?;
        let sql = format!(
            "SELECT {} FROM {} WHERE id = $1 AND deleted_at IS NULL",
            COLUMNS, BOOKS_TABLE
        );
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query_as::<_, Book>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| book_not_found(id))
    }

    async fn create(&self, book: NewBook) -> StoreResult<Book> {
        let book = prepare_book(&book)?;
        let now = Utc::now();
        let sql = format!(
            "INSERT INTO {} (title, author, published_date, created_at, updated_at) VALUES ($1, $2, $3, $4, $4) RETURNING {}",
            BOOKS_TABLE, COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        let row = sqlx::query_as::<_, Book>(&sql)
            .bind(&book.title)
            .bind(&book.author)
            .bind(&book.published_date)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;
        tracing::info!(book_id = row.id, "created book");
        Ok(row)
    }

    async fn update(&self, id: i64, book: NewBook) -> StoreResult<Book> {
        check_id(id)?;
        let book = prepare_book(&book)?;
        let sql = format!(
            "UPDATE {} SET title = $1, author = $2, published_date = $3, updated_at = $4 WHERE id = $5 AND deleted_at IS NULL RETURNING {}",
            BOOKS_TABLE, COLUMNS
        );
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Book>(&sql)
            .bind(&book.title)
            .bind(&book.author)
            .bind(&book.published_date)
            .bind(Utc::now())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| book_not_found(id))?;
        tracing::info!(book_id = id, "updated book");
        Ok(row)
    }

    async fn soft_delete(&self, id: i64) -> StoreResult<()> {
        check_id(id)?;
        let sql = format!(
            "UPDATE {} SET deleted_at = $1 WHERE id = $2 AND deleted_at IS NULL",
            BOOKS_TABLE
        );
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(&sql)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(book_not_found(id));
        }
        tracing::info!(book_id = id, "soft-deleted book");
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}
