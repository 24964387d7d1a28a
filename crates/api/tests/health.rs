//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use axum::http::StatusCode;
use common::{assert_cors_headers, body_json, get};

#[tokio::test]
async fn health_check_returns_ok_with_json() {
    let app = common::build_test_app();
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["backend"], "memory");
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = common::build_test_app();
    let response = get(app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cors_headers_present_on_every_response() {
    let app = common::build_test_app();

    let response = get(app.clone(), "/health").await;
    assert_cors_headers(&response);

    // Even 404s carry the permissive headers; the middleware decorates
    // whatever the router produced.
    let response = get(app, "/nope").await;
    assert_cors_headers(&response);
}
