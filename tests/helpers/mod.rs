//! Helpers for driving the router in-process

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt; // for oneshot

use crop_yield_api::app_state::AppState;
use crop_yield_api::routes::create_router;

pub fn app(state: AppState) -> Router {
    create_router(state, 64 * 1024)
}

/// Parse a response body as JSON.
pub async fn json_response(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    serde_json::from_slice(&body).expect("Failed to parse JSON")
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    (status, json_response(response).await)
}

/// POST a raw body, optionally with an `x-api-key` header, and return the
/// response body as text.
pub async fn post_text(
    app: Router,
    uri: &str,
    body: String,
    api_key: Option<&str>,
) -> (StatusCode, String) {
    let mut request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(key) = api_key {
        request = request.header("x-api-key", key);
    }

    let response = app
        .oneshot(request.body(Body::from(body)).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    (status, String::from_utf8(bytes.to_vec()).expect("UTF-8 body"))
}

pub async fn post_raw(
    app: Router,
    uri: &str,
    body: String,
    api_key: Option<&str>,
) -> (StatusCode, Value) {
    let (status, text) = post_text(app, uri, body, api_key).await;
    (status, serde_json::from_str(&text).expect("Failed to parse JSON"))
}

pub async fn post_json(
    app: Router,
    uri: &str,
    payload: &Value,
    api_key: Option<&str>,
) -> (StatusCode, Value) {
    post_raw(app, uri, payload.to_string(), api_key).await
}
