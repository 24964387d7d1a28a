//! The popup state endpoint: `GET`/`POST /api/popup-state`.
//!
//! `GET` never fails; an empty store yields the defaults. `POST` has patch
//! semantics: present, correctly typed fields are applied, wrong types are
//! silently ignored, unspecified fields are left untouched. The only error
//! the endpoint produces is a 400 for an unparseable body, in which case
//! nothing is mutated. `OPTIONS` is answered by the CORS middleware before
//! routing.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use popsync_core::StateUpdate;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Request path of the state endpoint.
pub const STATE_PATH: &str = "/api/popup-state";

/// GET /api/popup-state -- current state, defaults before any write.
///
/// Polled state must not be cached, hence `Cache-Control: no-store`.
async fn get_state(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.store.state().await;

    (
        [(header::CACHE_CONTROL, "no-store")],
        Json(json!({ "show": snapshot.show, "content": snapshot.content })),
    )
}

/// POST /api/popup-state -- apply a partial update.
///
/// The body is read as raw bytes rather than through the `Json` extractor
/// so a missing `Content-Type` does not reject an otherwise valid body;
/// only genuinely unparseable JSON yields the 400.
async fn update_state(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<impl IntoResponse> {
    let value: Value = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!(error = %e, "Rejecting unparseable popup state body");
        ApiError::InvalidBody
    })?;

    let update = StateUpdate::from_value(&value);
    let snapshot = state.store.apply(&update).await;

    Ok(Json(json!({
        "ok": true,
        "show": snapshot.show,
        "content": snapshot.content,
    })))
}

/// Mount the state endpoint routes.
pub fn router() -> Router<AppState> {
    Router::new().route(STATE_PATH, get(get_state).post(update_state))
}
