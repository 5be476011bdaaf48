//! Credentials from either a JSON or a form-encoded body.

use crate::error::AppError;
use crate::handlers::bad_body;
use crate::models::Credentials;
use async_trait::async_trait;
use axum::{
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};

pub struct CredentialsBody(pub Credentials);

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("application/x-www-form-urlencoded"))
        .unwrap_or(false)
}

#[async_trait]
impl<S> FromRequest<S> for CredentialsBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&req) {
            let Form(credentials) = Form::<Credentials>::from_request(req, state)
                .await
                .map_err(|rejection| {
                    AppError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
                })?;
            return Ok(CredentialsBody(credentials));
        }
        let Json(credentials) = Json::<Credentials>::from_request(req, state)
            .await
            .map_err(bad_body)?;
        Ok(CredentialsBody(credentials))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request(content_type: &str, body: &str) -> Request {
        axum::http::Request::builder()
            .method("POST")
            .header(CONTENT_TYPE, content_type)
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn reads_json_and_form_bodies() {
        let CredentialsBody(json) = CredentialsBody::from_request(
            request("application/json", r#"{"email":"reader@example.com","password":"pw"}"#),
            &(),
        )
        .await
        .unwrap();
        assert_eq!(json.email, "reader@example.com");

        let CredentialsBody(form) = CredentialsBody::from_request(
            request("application/x-www-form-urlencoded", "email=reader%40example.com&password=pw"),
            &(),
        )
        .await
        .unwrap();
        assert_eq!(form.email, "reader@example.com");
        assert_eq!(form.password, "pw");
    }

    #[tokio::test]
    async fn malformed_body_is_a_bad_request() {
        let err = CredentialsBody::from_request(request("application/json", "{\"email\":"), &())
            .await
            .err()
            .unwrap();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
