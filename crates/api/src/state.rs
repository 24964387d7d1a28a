use std::sync::Arc;

use popsync_core::PopupStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (the store is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// The popup state store, constructed once at process start.
    pub store: Arc<PopupStore>,
}

impl AppState {
    /// Wrap a store for handler access.
    pub fn new(store: Arc<PopupStore>) -> Self {
        Self { store }
    }
}
