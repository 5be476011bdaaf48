//! In-process backends for local development and tests.

use super::{
    book_not_found, check_credentials, check_id, check_token, prepare_book, AuthRepository,
    BookRepository, StoreError, StoreResult,
};
use crate::models::{Book, NewBook, Session, UserProfile};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

const SESSION_TTL_SECS: i64 = 3600;

#[derive(Debug, Default)]
struct BookTable {
    last_id: i64,
    rows: BTreeMap<i64, Book>,
}

/// Book store held in memory. Ids are assigned under the write lock.
#[derive(Debug, Default, Clone)]
pub struct MemoryBookRepository {
    table: Arc<RwLock<BookTable>>,
}

impl MemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookRepository for MemoryBookRepository {
    async fn list_active(&self) -> StoreResult<Vec<Book>> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .filter(|b| b.deleted_at.is_none())
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<Book> {
        check_id(id)?;
        let table = self.table.read().await;
        table
            .rows
            .get(&id)
            .filter(|b| b.deleted_at.is_none())
            .cloned()
            .ok_or_else(|| book_not_found(id))
    }

    async fn create(&self, book: NewBook) -> StoreResult<Book> {
        let book = prepare_book(&book)?;
        let mut table = self.table.write().await;
        table.last_id += 1;
        let now = Utc::now();
        let row = Book {
            id: table.last_id,
            title: book.title,
            author: book.author,
            published_date: book.published_date,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        table.rows.insert(row.id, row.clone());
        tracing::info!(book_id = row.id, "created book");
        Ok(row)
    }

    async fn update(&self, id: i64, book: NewBook) -> StoreResult<Book> {
        check_id(id)?;
        let book = prepare_book(&book)?;
        let mut table = self.table.write().await;
        let row = table
            .rows
            .get_mut(&id)
            .filter(|b| b.deleted_at.is_none())
            .ok_or_else(|| book_not_found(id))?;
        row.title = book.title;
        row.author = book.author;
        row.published_date = book.published_date;
        row.updated_at = Utc::now();
        tracing::info!(book_id = id, "updated book");
        Ok(row.clone())
    }

    async fn soft_delete(&self, id: i64) -> StoreResult<()> {
        check_id(id)?;
        let mut table = self.table.write().await;
        let row = table
            .rows
            .get_mut(&id)
            .filter(|b| b.deleted_at.is_none())
            .ok_or_else(|| book_not_found(id))?;
        row.deleted_at = Some(Utc::now());
        tracing::info!(book_id = id, "soft-deleted book");
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct Account {
    profile: UserProfile,
    password: String,
}

#[derive(Debug, Default)]
struct Directory {
    accounts: HashMap<String, Account>,
    /// access token -> email
    sessions: HashMap<String, String>,
}

/// Identity provider held in memory. Not for production: passwords are kept
/// as given.
#[derive(Debug, Default, Clone)]
pub struct MemoryAuthRepository {
    directory: Arc<RwLock<Directory>>,
}

impl MemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuthRepository for MemoryAuthRepository {
    async fn register(&self, email: &str, password: &str) -> StoreResult<()> {
        check_credentials(email, password)?;
        let mut directory = self.directory.write().await;
        if directory.accounts.contains_key(email) {
            return Err(StoreError::Provider {
                status: 422,
                message: "User already registered".into(),
            });
        }
        let now = Utc::now();
        let profile = UserProfile {
            id: uuid::Uuid::new_v4().to_string(),
            email: email.to_string(),
            role: Some("authenticated".into()),
            created_at: Some(now),
            updated_at: Some(now),
        };
        directory.accounts.insert(
            email.to_string(),
            Account {
                profile,
                password: password.to_string(),
            },
        );
        Ok(())
    }

    async fn sign_in(&self, email: &str, password: &str) -> StoreResult<Session> {
        check_credentials(email, password)?;
        let mut directory = self.directory.write().await;
        let profile = match directory.accounts.get(email) {
            Some(account) if account.password == password => account.profile.clone(),
            _ => {
                return Err(StoreError::InvalidCredentials {
                    status: 400,
                    message: "Invalid login credentials".into(),
                })
            }
        };
        let access_token = uuid::Uuid::new_v4().simple().to_string();
        directory.sessions.insert(access_token.clone(), email.to_string());
        Ok(Session {
            access_token,
            token_type: "bearer".into(),
            expires_in: SESSION_TTL_SECS,
            refresh_token: uuid::Uuid::new_v4().simple().to_string(),
            user: profile,
        })
    }

    async fn sign_out(&self, token: &str) -> StoreResult<()> {
        check_token(token)?;
        let mut directory = self.directory.write().await;
        directory
            .sessions
            .remove(token)
            .map(|_| ())
            .ok_or(StoreError::Unauthorized)
    }

    async fn get_user(&self, token: &str) -> StoreResult<UserProfile> {
        check_token(token)?;
        let directory = self.directory.read().await;
        directory
            .sessions
            .get(token)
            .and_then(|email| directory.accounts.get(email))
            .map(|account| account.profile.clone())
            .ok_or(StoreError::Unauthorized)
    }
}
