use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use bookshelf_api::{app, AppState};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

const BODY_LIMIT: usize = 64 * 1024;

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn signed_in() -> (Router, String) {
    let state = AppState::in_memory();
    let session = state.users.sign_up("reader@example.com", "hunter22").await.unwrap();
    (app(state, BODY_LIMIT), session.access_token)
}

async fn create_dune(router: &Router, token: &str) -> i64 {
    let response = router
        .clone()
        .oneshot(request(
            Method::POST,
            "/book",
            Some(token),
            Some(json!({"title": "Dune", "author": "Herbert", "published_date": "1965-01-01"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    body["data"]["id"].as_i64().unwrap()
}

#[tokio::test]
async fn create_returns_envelope_with_new_book() {
    let (router, token) = signed_in().await;
    let response = router
        .oneshot(request(
            Method::POST,
            "/book",
            Some(&token),
            Some(json!({"title": "Dune", "author": "Herbert", "published_date": "1965-01-01"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], 200);
    assert_eq!(body["message"], "Book created successfully");
    assert!(body["data"]["id"].as_i64().unwrap() > 0);
    assert_eq!(body["data"]["title"], "Dune");
    assert!(body["data"]["deleted_at"].is_null());
}

#[tokio::test]
async fn list_and_read_are_public() {
    let (router, token) = signed_in().await;
    let id = create_dune(&router, &token).await;

    let response = router
        .clone()
        .oneshot(request(Method::GET, "/book", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Books fetched successfully");
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let response = router
        .oneshot(request(Method::GET, &format!("/book/{}", id), None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["data"]["author"], "Herbert");
}

#[tokio::test]
async fn empty_title_is_rejected() {
    let (router, token) = signed_in().await;
    let response = router
        .clone()
        .oneshot(request(
            Method::POST,
            "/book",
            Some(&token),
            Some(json!({"title": "", "author": "Herbert"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body, json!({"code": 400, "message": "title and author are required"}));

    let response = router.oneshot(request(Method::GET, "/book", None, None)).await.unwrap();
    assert_eq!(json_body(response).await["data"], json!([]));
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let (router, token) = signed_in().await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/book")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"title\": "))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["code"], 400);
}

#[tokio::test]
async fn missing_book_is_not_found() {
    let (router, _) = signed_in().await;
    let response = router
        .oneshot(request(Method::GET, "/book/999999", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["code"], 404);
}

#[tokio::test]
async fn bad_ids_are_rejected() {
    let (router, _) = signed_in().await;
    for (uri, message) in [
        ("/book/abc", "Invalid ID"),
        ("/book/-4", "Invalid ID"),
        ("/book/0", "ID is required"),
    ] {
        let response = router
            .clone()
            .oneshot(request(Method::GET, uri, None, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(json_body(response).await["message"], message);
    }
}

#[tokio::test]
async fn delete_without_token_changes_nothing() {
    let (router, token) = signed_in().await;
    let id = create_dune(&router, &token).await;

    let response = router
        .clone()
        .oneshot(request(Method::DELETE, &format!("/book/{}", id), None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        json_body(response).await,
        json!({"code": 401, "message": "Unauthorized"})
    );

    let response = router
        .oneshot(request(Method::GET, &format!("/book/{}", id), None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn forged_token_cannot_write() {
    let (router, _) = signed_in().await;
    let response = router
        .oneshot(request(
            Method::POST,
            "/book",
            Some("forged"),
            Some(json!({"title": "Dune", "author": "Herbert"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn update_uses_path_id() {
    let (router, token) = signed_in().await;
    let id = create_dune(&router, &token).await;

    let response = router
        .oneshot(request(
            Method::PUT,
            &format!("/book/{}", id),
            Some(&token),
            Some(json!({"id": 12345, "title": "Dune Messiah", "author": "Frank Herbert", "published_date": "1969"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Book updated successfully");
    assert_eq!(body["data"]["id"], id);
    assert_eq!(body["data"]["title"], "Dune Messiah");
}

#[tokio::test]
async fn soft_deleted_book_disappears() {
    let (router, token) = signed_in().await;
    let id = create_dune(&router, &token).await;
    let uri = format!("/book/{}", id);

    let response = router
        .clone()
        .oneshot(request(Method::DELETE, &uri, Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({"status": 200, "message": "Book deleted successfully"})
    );

    for method in [Method::GET, Method::DELETE] {
        let response = router
            .clone()
            .oneshot(request(method, &uri, Some(&token), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    let response = router.oneshot(request(Method::GET, "/book", None, None)).await.unwrap();
    assert_eq!(json_body(response).await["data"], json!([]));
}

#[tokio::test]
async fn health_ready_and_unknown_routes() {
    let (router, _) = signed_in().await;

    let response = router
        .clone()
        .oneshot(request(Method::GET, "/health", None, None))
        .await
        .unwrap();
    assert_eq!(json_body(response).await, json!({"status": "ok"}));

    let response = router
        .clone()
        .oneshot(request(Method::GET, "/ready", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .oneshot(request(Method::GET, "/nowhere", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["code"], 404);
}
