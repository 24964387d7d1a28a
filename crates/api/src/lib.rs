//! HTTP server exposing the popup state API.
//!
//! One endpoint, permissive CORS: any page may read the state, the operator
//! dashboard (and the widget's dismiss control) may patch it. The router is
//! built by [`app`] so the binary and the integration tests exercise the
//! same middleware stack.

use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

pub mod config;
pub mod cors;
pub mod error;
pub mod routes;
pub mod state;

pub use state::AppState;

/// Build the application router with the full middleware stack.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::popup_state::router())
        // -- Middleware stack (applied bottom-up) --
        // Panic recovery: catch panics and return 500.
        .layer(CatchPanicLayer::new())
        // Structured request/response tracing.
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Permissive CORS, outermost so preflights short-circuit routing.
        .layer(axum::middleware::from_fn(cors::permissive_cors))
        .with_state(state)
}
