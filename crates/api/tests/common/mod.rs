// Not every test binary uses every helper.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use popsync_api::state::AppState;
use popsync_core::PopupStore;

/// Build the full application router over a fresh in-memory store.
///
/// Uses the same `popsync_api::app` builder as `main.rs` so integration
/// tests exercise the production middleware stack (CORS, tracing, panic
/// recovery).
pub fn build_test_app() -> Router {
    popsync_api::app(AppState::new(Arc::new(PopupStore::in_memory())))
}

/// Issue a GET request against the app.
pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Issue a POST with a JSON content type and the given raw body.
pub async fn post_raw(app: Router, uri: &str, body: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Issue a POST with a JSON value body.
pub async fn post_json(app: Router, uri: &str, body: &Value) -> Response {
    post_raw(app, uri, &body.to_string()).await
}

/// Issue an OPTIONS (preflight) request against the app.
pub async fn options(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::OPTIONS)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body must be valid JSON")
}

/// Assert that the expected status and permissive CORS headers are present.
pub fn assert_cors_headers(response: &Response) {
    let headers = response.headers();
    assert_eq!(
        headers.get("access-control-allow-origin").unwrap(),
        "*",
        "every response must allow any origin"
    );
    assert_eq!(
        headers.get("access-control-allow-methods").unwrap(),
        "GET, POST, OPTIONS"
    );
    assert_eq!(
        headers.get("access-control-allow-headers").unwrap(),
        "Content-Type"
    );
}
