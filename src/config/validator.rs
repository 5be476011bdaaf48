//! Config validation: every selected backend has what it needs.

use crate::config::{AppConfig, BookBackend};
use crate::error::ConfigError;

pub fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::Invalid {
            key: "PORT",
            details: "must be non-zero".into(),
        });
    }
    match config.backend {
        BookBackend::Postgres => {
            let db = config.database.as_ref().ok_or(ConfigError::Missing("DATABASE_URL"))?;
            if db.max_connections == 0 {
                return Err(ConfigError::Invalid {
                    key: "DATABASE_MAX_CONNECTIONS",
                    details: "must be at least 1".into(),
                });
            }
            // Accounts and sessions always live with the provider.
            config.provider.as_ref().ok_or(ConfigError::Missing("PROVIDER_URL"))?;
        }
        BookBackend::Hosted => {
            config.provider.as_ref().ok_or(ConfigError::Missing("PROVIDER_URL"))?;
        }
        BookBackend::Memory => {}
    }
    if let Some(provider) = &config.provider {
        if !provider.url.starts_with("http://") && !provider.url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                key: "PROVIDER_URL",
                details: "must be an http(s) URL".into(),
            });
        }
    }
    Ok(())
}
