//! Load configuration from environment variables (after reading `.env` if present).

use crate::config::types::*;
use crate::config::validate;
use crate::error::ConfigError;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

impl AppConfig {
    /// Read `.env` (if any) and then the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let server = ServerConfig {
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.into()),
            port: parse_or(get("PORT"), "PORT", DEFAULT_PORT)?,
            max_body_bytes: parse_or(get("MAX_BODY_BYTES"), "MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES)?,
        };

        let backend = match get("BOOK_BACKEND") {
            Some(raw) => BookBackend::from_str(&raw).map_err(|details| ConfigError::Invalid {
                key: "BOOK_BACKEND",
                details,
            })?,
            None => BookBackend::Postgres,
        };

        let database = match get("DATABASE_URL") {
            Some(url) => Some(DatabaseConfig {
                url,
                max_connections: parse_or(
                    get("DATABASE_MAX_CONNECTIONS"),
                    "DATABASE_MAX_CONNECTIONS",
                    DEFAULT_MAX_CONNECTIONS,
                )?,
            }),
            None => None,
        };

        let provider = match get("PROVIDER_URL") {
            Some(url) => Some(ProviderConfig {
                url,
                api_key: get("PROVIDER_API_KEY").ok_or(ConfigError::Missing("PROVIDER_API_KEY"))?,
                timeout: Duration::from_secs(parse_or(
                    get("PROVIDER_TIMEOUT_SECS"),
                    "PROVIDER_TIMEOUT_SECS",
                    DEFAULT_TIMEOUT_SECS,
                )?),
            }),
            None => None,
        };

        let config = AppConfig {
            server,
            backend,
            database,
            provider,
        };
        validate(&config)?;
        Ok(config)
    }
}

fn parse_or<T>(raw: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(v) => v.parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            details: e.to_string(),
        }),
        None => Ok(default),
    }
}
