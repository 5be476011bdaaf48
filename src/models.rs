//! Domain types: books, credentials and identity-provider sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A catalogue entry. Rows with `deleted_at` set are soft-deleted and never
/// returned by reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    /// Free text; absent or null decodes as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub published_date: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Inbound book payload for create and update. Missing fields decode as empty
/// strings so that required-field checks report them instead of the decoder.
/// `id` is accepted for compatibility but the path parameter always wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewBook {
    #[serde(skip_serializing)]
    pub id: Option<i64>,
    pub title: String,
    pub author: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub published_date: String,
}

impl NewBook {
    pub fn new(title: impl Into<String>, author: impl Into<String>, published_date: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            author: author.into(),
            published_date: published_date.into(),
        }
    }

    /// Copy with surrounding whitespace removed from every text field.
    pub fn trimmed(&self) -> Self {
        Self {
            id: self.id,
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            published_date: self.published_date.trim().to_string(),
        }
    }
}

/// Email/password pair. Only ever forwarded to the identity provider.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// User identity as reported by the identity provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Session issued by the identity provider on sign-in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    pub access_token: String,
    pub token_type: String,
    /// Lifetime of `access_token` in seconds.
    pub expires_in: i64,
    pub refresh_token: String,
    pub user: UserProfile,
}
