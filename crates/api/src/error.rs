use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// The state API has exactly one client-visible failure: an unparseable
/// POST body. Storage failures never reach here; the store swallows them.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request body was not valid JSON.
    #[error("invalid request body")]
    InvalidBody,
}

/// Convenience type alias for handler return values.
pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InvalidBody => (StatusCode::BAD_REQUEST, "Invalid body"),
        };

        (status, axum::Json(json!({ "error": message }))).into_response()
    }
}
