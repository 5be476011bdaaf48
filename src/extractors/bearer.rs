//! Bearer token from the `Authorization` header, and the authorization gate
//! that resolves it with the identity provider on every request.

use crate::error::AppError;
use crate::models::UserProfile;
use crate::state::AppState;
use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

/// Optional bearer token. Accepts `Bearer <token>` (any case) or a bare token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BearerToken(pub Option<String>);

impl BearerToken {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let value = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(strip_scheme)
            .filter(|s| !s.is_empty())
            .map(String::from);
        BearerToken(value)
    }
}

fn strip_scheme(raw: &str) -> &str {
    let raw = raw.trim();
    match raw.split_once(' ') {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        None if raw.eq_ignore_ascii_case("bearer") => "",
        _ => raw,
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(BearerToken::from_headers(&parts.headers))
    }
}

/// Caller whose bearer token the identity provider accepted. Rejects with 401
/// before the handler body runs.
#[derive(Clone, Debug)]
pub struct Authenticated(pub UserProfile);

#[async_trait]
impl FromRequestParts<AppState> for Authenticated {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let BearerToken(token) = BearerToken::from_headers(&parts.headers);
        let token = token.ok_or_else(AppError::unauthorized)?;
        match state.users.get_user(&token).await {
            Ok(profile) => Ok(Authenticated(profile)),
            Err(err) => {
                tracing::warn!(error = %err, path = %parts.uri.path(), "rejected bearer token");
                Err(AppError::unauthorized())
            }
        }
    }
}
