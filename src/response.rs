//! Standard response envelope helpers.

use axum::{http::StatusCode, Json};
use serde::Serialize;

const DEFAULT_MESSAGE: &str = "Success";

/// Success envelope: `{"status": 200, "message": "...", "data": ...}`.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Error envelope: `{"code": 400, "message": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: u16,
    pub message: String,
}

pub fn success<T: Serialize>(message: &str, data: T) -> (StatusCode, Json<Envelope<T>>) {
    envelope(message, Some(data))
}

/// Success envelope without a `data` member.
pub fn success_empty(message: &str) -> (StatusCode, Json<Envelope<()>>) {
    envelope(message, None)
}

fn envelope<T: Serialize>(message: &str, data: Option<T>) -> (StatusCode, Json<Envelope<T>>) {
    let message = if message.is_empty() { DEFAULT_MESSAGE } else { message };
    (
        StatusCode::OK,
        Json(Envelope {
            status: StatusCode::OK.as_u16(),
            message: message.to_string(),
            data,
        }),
    )
}

pub fn error_body(status: StatusCode, message: impl Into<String>) -> serde_json::Value {
    serde_json::json!({
        "code": status.as_u16(),
        "message": message.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_envelope_shape() {
        let (status, Json(body)) = success("Books fetched successfully", vec![1, 2]);
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({"status": 200, "message": "Books fetched successfully", "data": [1, 2]})
        );
    }

    #[test]
    fn empty_message_defaults_and_data_is_omitted() {
        let (_, Json(body)) = success_empty("");
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({"status": 200, "message": "Success"})
        );
    }

    #[test]
    fn error_body_shape() {
        assert_eq!(
            error_body(StatusCode::UNAUTHORIZED, "Unauthorized"),
            json!({"code": 401, "message": "Unauthorized"})
        );
    }
}
