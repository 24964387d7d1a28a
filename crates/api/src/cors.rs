//! Permissive cross-origin middleware.
//!
//! The state endpoint is read by scripts embedded on arbitrary third-party
//! pages, so every response advertises `Access-Control-Allow-Origin: *`.
//! Preflights are answered here with `204 No Content` and a one-day
//! `Access-Control-Max-Age`; tower-http's `CorsLayer` answers preflights
//! with 200, which is why this is a hand-rolled layer instead.

use axum::extract::Request;
use axum::http::header::{
    HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_MAX_AGE,
};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

/// Seconds a browser may cache the preflight response.
const PREFLIGHT_MAX_AGE_SECS: &str = "86400";

/// Answer preflights with 204 and decorate every other response with the
/// permissive CORS headers.
pub async fn permissive_cors(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        let mut response = StatusCode::NO_CONTENT.into_response();
        apply_cors_headers(response.headers_mut());
        response.headers_mut().insert(
            ACCESS_CONTROL_MAX_AGE,
            HeaderValue::from_static(PREFLIGHT_MAX_AGE_SECS),
        );
        return response;
    }

    let mut response = next.run(request).await;
    apply_cors_headers(response.headers_mut());
    response
}

fn apply_cors_headers(headers: &mut HeaderMap) {
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
}
