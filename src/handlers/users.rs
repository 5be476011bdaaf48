//! Sign-up, sign-in and sign-out. Sign-in style responses also set a `token`
//! cookie; authorization never reads it back.

use crate::error::AppError;
use crate::extractors::{BearerToken, CredentialsBody};
use crate::models::{Credentials, Session};
use crate::response::{success, success_empty};
use crate::state::AppState;
use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderValue},
    response::IntoResponse,
};
use chrono::{Duration, Utc};

pub const TOKEN_COOKIE: &str = "token";
const HTTP_DATE: &str = "%a, %d %b %Y %H:%M:%S GMT";
const MAX_COOKIE_SECS: i64 = 365 * 24 * 60 * 60;

fn session_cookie(session: &Session) -> Result<HeaderValue, AppError> {
    let expires = Utc::now() + Duration::seconds(session.expires_in.clamp(0, MAX_COOKIE_SECS));
    cookie(&session.access_token, &expires.format(HTTP_DATE).to_string())
}

fn cleared_cookie() -> Result<HeaderValue, AppError> {
    cookie("", "Thu, 01 Jan 1970 00:00:00 GMT")
}

fn cookie(value: &str, expires: &str) -> Result<HeaderValue, AppError> {
    let raw = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Expires={}",
        TOKEN_COOKIE, value, expires
    );
    HeaderValue::from_str(&raw).map_err(|e| AppError::Internal(format!("failed to build cookie: {}", e)))
}

fn check_credentials(credentials: &Credentials) -> Result<(), AppError> {
    if credentials.email.trim().is_empty() || credentials.password.is_empty() {
        return Err(AppError::BadRequest("Email and password are required".into()));
    }
    Ok(())
}

pub async fn sign_up(
    State(state): State<AppState>,
    CredentialsBody(credentials): CredentialsBody,
) -> Result<impl IntoResponse, AppError> {
    check_credentials(&credentials)?;
    let session = state.users.sign_up(&credentials.email, &credentials.password).await?;
    tracing::info!(user = %session.user.email, "account created");
    let cookie = session_cookie(&session)?;
    Ok(([(SET_COOKIE, cookie)], success("User created successfully", session)))
}

pub async fn sign_in(
    State(state): State<AppState>,
    CredentialsBody(credentials): CredentialsBody,
) -> Result<impl IntoResponse, AppError> {
    check_credentials(&credentials)?;
    let session = state.users.sign_in(&credentials.email, &credentials.password).await?;
    let cookie = session_cookie(&session)?;
    Ok(([(SET_COOKIE, cookie)], success("User signed in successfully", session)))
}

pub async fn sign_out(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<impl IntoResponse, AppError> {
    let token = token.ok_or_else(AppError::unauthorized)?;
    state.users.sign_out(&token).await?;
    Ok(([(SET_COOKIE, cleared_cookie()?)], success_empty("User signed out successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_cookie_carries_token_and_expiry() {
        let session = Session {
            access_token: "jwt-abc".into(),
            expires_in: 3600,
            ..Default::default()
        };
        let cookie = session_cookie(&session).unwrap();
        let cookie = cookie.to_str().unwrap();
        assert!(cookie.starts_with("token=jwt-abc; Path=/; HttpOnly"));
        assert!(cookie.contains("Expires="));
        assert!(cookie.ends_with(" GMT"));
    }

    #[test]
    fn cleared_cookie_is_expired() {
        let cookie = cleared_cookie().unwrap();
        assert_eq!(
            cookie.to_str().unwrap(),
            "token=; Path=/; HttpOnly; SameSite=Lax; Expires=Thu, 01 Jan 1970 00:00:00 GMT"
        );
    }
}
