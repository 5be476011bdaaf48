//! Hosted backend-as-a-service: books over its REST table endpoint, accounts
//! and sessions over its auth endpoint.

use super::{
    book_not_found, check_credentials, check_id, check_token, prepare_book, AuthRepository,
    BookRepository, StoreError, StoreResult,
};
use crate::migration::BOOKS_TABLE;
use crate::models::{Book, NewBook, Session, UserProfile};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;

const RETURN_REPRESENTATION: (&str, &str) = ("Prefer", "return=representation");

/// Shared HTTP client for one hosted project.
#[derive(Clone)]
pub struct HostedClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HostedClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> StoreResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn rest(&self, method: reqwest::Method) -> RequestBuilder {
        let url = format!("{}/rest/v1/{}", self.base_url, BOOKS_TABLE);
        tracing::debug!(%method, url = %url, "provider request");
        self.http
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    fn auth(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        let url = format!("{}/auth/v1/{}", self.base_url, path);
        tracing::debug!(%method, url = %url, "provider request");
        self.http.request(method, url).header("apikey", &self.api_key)
    }
}

/// Status and the most specific message the provider sent.
async fn provider_failure(response: Response) -> (u16, String) {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| {
            ["msg", "error_description", "message", "error"]
                .iter()
                .find_map(|k| v.get(*k).and_then(Value::as_str).map(String::from))
        })
        .unwrap_or_else(|| if body.is_empty() { format!("status {}", status) } else { body });
    (status, message)
}

async fn provider_error(response: Response) -> StoreError {
    let (status, message) = provider_failure(response).await;
    StoreError::Provider { status, message }
}

async fn ok_or_provider_error(response: Response) -> StoreResult<Response> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(provider_error(response).await)
    }
}

fn is_auth_rejection(status: StatusCode) -> bool {
    status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN
}

#[derive(Clone)]
pub struct HostedBookRepository {
    client: HostedClient,
}

impl HostedBookRepository {
    pub fn new(client: HostedClient) -> Self {
        Self { client }
    }

    async fn first_row(response: Response, id: i64) -> StoreResult<Book> {
        let rows: Vec<Book> = ok_or_provider_error(response).await?.json().await?;
        rows.into_iter().next().ok_or_else(|| book_not_found(id))
    }
}

#[async_trait]
impl BookRepository for HostedBookRepository {
    async fn list_active(&self) -> StoreResult<Vec<Book>> {
        let response = self
            .client
            .rest(reqwest::Method::GET)
            .query(&[("select", "*"), ("deleted_at", "is.null")])
            .send()
            .await?;
        Ok(ok_or_provider_error(response).await?.json().await?)
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<Book> {
        check_id(id)?;
        let response = self
            .client
            .rest(reqwest::Method::GET)
            .query(&[
                ("select", "*".to_string()),
                ("id", format!("eq.{}", id)),
                ("deleted_at", "is.null".to_string()),
            ])
            .send()
            .await?;
        Self::first_row(response, id).await
    }

    async fn create(&self, book: NewBook) -> StoreResult<Book> {
        let book = prepare_book(&book)?;
        let now = Utc::now();
        let response = self
            .client
            .rest(reqwest::Method::POST)
            .header(RETURN_REPRESENTATION.0, RETURN_REPRESENTATION.1)
            .json(&json!({
                "title": book.title,
                "author": book.author,
                "published_date": book.published_date,
                "created_at": now,
                "updated_at": now,
            }))
            .send()
            .await?;
        let rows: Vec<Book> = ok_or_provider_error(response).await?.json().await?;
        let row = rows.into_iter().next().ok_or_else(|| StoreError::Provider {
            status: 200,
            message: "insert returned no row".into(),
        })?;
        tracing::info!(book_id = row.id, "created book");
        Ok(row)
    }

    async fn update(&self, id: i64, book: NewBook) -> StoreResult<Book> {
        check_id(id)?;
        let book = prepare_book(&book)?;
        let response = self
            .client
            .rest(reqwest::Method::PATCH)
            .header(RETURN_REPRESENTATION.0, RETURN_REPRESENTATION.1)
            .query(&[("id", format!("eq.{}", id)), ("deleted_at", "is.null".to_string())])
            .json(&json!({
                "title": book.title,
                "author": book.author,
                "published_date": book.published_date,
                "updated_at": Utc::now(),
            }))
            .send()
            .await?;
        let row = Self::first_row(response, id).await?;
        tracing::info!(book_id = id, "updated book");
        Ok(row)
    }

    async fn soft_delete(&self, id: i64) -> StoreResult<()> {
        check_id(id)?;
        let response = self
            .client
            .rest(reqwest::Method::PATCH)
            .header(RETURN_REPRESENTATION.0, RETURN_REPRESENTATION.1)
            .query(&[
                ("select", "id".to_string()),
                ("id", format!("eq.{}", id)),
                ("deleted_at", "is.null".to_string()),
            ])
            .json(&json!({ "deleted_at": Utc::now() }))
            .send()
            .await?;
        let rows: Vec<Value> = ok_or_provider_error(response).await?.json().await?;
        if rows.is_empty() {
            return Err(book_not_found(id));
        }
        tracing::info!(book_id = id, "soft-deleted book");
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        let response = self
            .client
            .rest(reqwest::Method::GET)
            .query(&[("select", "id"), ("limit", "1")])
            .send()
            .await?;
        ok_or_provider_error(response).await?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct HostedAuthRepository {
    client: HostedClient,
}

impl HostedAuthRepository {
    pub fn new(client: HostedClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthRepository for HostedAuthRepository {
    async fn register(&self, email: &str, password: &str) -> StoreResult<()> {
        check_credentials(email, password)?;
        let response = self
            .client
            .auth(reqwest::Method::POST, "signup")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        ok_or_provider_error(response).await?;
        tracing::info!(email, "registered account");
        Ok(())
    }

    async fn sign_in(&self, email: &str, password: &str) -> StoreResult<Session> {
        check_credentials(email, password)?;
        let response = self
            .client
            .auth(reqwest::Method::POST, "token")
            .query(&[("grant_type", "password")])
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        if response.status() == StatusCode::BAD_REQUEST || is_auth_rejection(response.status()) {
            let (status, message) = provider_failure(response).await;
            return Err(StoreError::InvalidCredentials { status, message });
        }
        Ok(ok_or_provider_error(response).await?.json().await?)
    }

    async fn sign_out(&self, token: &str) -> StoreResult<()> {
        check_token(token)?;
        let response = self
            .client
            .auth(reqwest::Method::POST, "logout")
            .bearer_auth(token)
            .send()
            .await?;
        if is_auth_rejection(response.status()) {
            return Err(StoreError::Unauthorized);
        }
        ok_or_provider_error(response).await?;
        Ok(())
    }

    async fn get_user(&self, token: &str) -> StoreResult<UserProfile> {
        check_token(token)?;
        let response = self
            .client
            .auth(reqwest::Method::GET, "user")
            .bearer_auth(token)
            .send()
            .await?;
        if is_auth_rejection(response.status()) {
            return Err(StoreError::Unauthorized);
        }
        Ok(ok_or_provider_error(response).await?.json().await?)
    }
}
