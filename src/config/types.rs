//! Configuration types.

use std::time::Duration;

/// Which repository backs the book resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BookBackend {
    /// Relational store reached through `DATABASE_URL`.
    Postgres,
    /// REST table endpoint of the hosted provider.
    Hosted,
    /// In-process store; also swaps the identity provider for an in-process one.
    Memory,
}

impl std::str::FromStr for BookBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(BookBackend::Postgres),
            "hosted" => Ok(BookBackend::Hosted),
            "memory" => Ok(BookBackend::Memory),
            other => Err(format!("unknown backend '{}' (expected postgres, hosted or memory)", other)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_body_bytes: usize,
}

impl ServerConfig {
    /// "host:port" for binding.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Hosted backend-as-a-service project.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub url: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("url", &self.url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub backend: BookBackend,
    /// Present when `backend` is `Postgres`.
    pub database: Option<DatabaseConfig>,
    /// Present unless `backend` is `Memory`.
    pub provider: Option<ProviderConfig>,
}
