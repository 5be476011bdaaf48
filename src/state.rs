//! Shared application state for all routes, and the composition root that picks
//! repository backends from configuration.

use crate::config::{AppConfig, BookBackend, ProviderConfig};
use crate::error::ConfigError;
use crate::migration::{ensure_books_table, ensure_database_exists};
use crate::service::{BookService, UserService};
use crate::store::{
    AuthRepository, BookRepository, HostedAuthRepository, HostedBookRepository, HostedClient,
    MemoryAuthRepository, MemoryBookRepository, PgBookRepository,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub books: BookService,
    pub users: UserService,
}

impl AppState {
    pub fn new(books: Arc<dyn BookRepository>, users: Arc<dyn AuthRepository>) -> Self {
        Self {
            books: BookService::new(books),
            users: UserService::new(users),
        }
    }

    /// Both repositories in process; nothing external is contacted.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryBookRepository::new()),
            Arc::new(MemoryAuthRepository::new()),
        )
    }

    /// Build the state the configuration asks for. For PostgreSQL this also
    /// creates the database and the books table when missing.
    pub async fn connect(config: &AppConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let state = match config.backend {
            BookBackend::Memory => {
                tracing::warn!("using in-memory repositories; data is lost on restart");
                Self::in_memory()
            }
            BookBackend::Hosted => {
                let client = hosted_client(config.provider.as_ref())?;
                Self::new(
                    Arc::new(HostedBookRepository::new(client.clone())),
                    Arc::new(HostedAuthRepository::new(client)),
                )
            }
            BookBackend::Postgres => {
                let db = config.database.as_ref().ok_or(ConfigError::Missing("DATABASE_URL"))?;
                ensure_database_exists(&db.url).await?;
                let pool = sqlx::postgres::PgPoolOptions::new()
                    .max_connections(db.max_connections)
                    .connect(&db.url)
                    .await?;
                ensure_books_table(&pool).await?;
                let client = hosted_client(config.provider.as_ref())?;
                Self::new(
                    Arc::new(PgBookRepository::new(pool)),
                    Arc::new(HostedAuthRepository::new(client)),
                )
            }
        };
        tracing::info!(backend = ?config.backend, "repositories ready");
        Ok(state)
    }
}

fn hosted_client(provider: Option<&ProviderConfig>) -> Result<HostedClient, Box<dyn std::error::Error>> {
    let provider = provider.ok_or(ConfigError::Missing("PROVIDER_URL"))?;
    Ok(HostedClient::new(&provider.url, &provider.api_key, provider.timeout)?)
}
