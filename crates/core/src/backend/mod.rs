//! Pluggable persistence backends for the popup state.
//!
//! Every backend implements the same two-method capability: `load` the
//! composite record (or nothing), `save` the full record. The store calls
//! through the selected strategy uniformly; backend selection happens once,
//! in [`select_backend`].

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::StoreConfig;
use crate::error::BackendError;
use crate::state::PopupState;

pub mod file;
pub mod memory;
pub mod remote;

pub use file::FileBackend;
pub use memory::MemoryBackend;
pub use remote::RemoteBackend;

/// A persistence strategy for the popup state singleton.
///
/// `load` is infallible by design: any failure (missing data, I/O error,
/// malformed payload) yields `None` and the store keeps its cached value.
/// `save` returns a `Result` for callers that await durability; the store's
/// spawned best-effort writes log and discard it.
#[async_trait]
pub trait StateBackend: Send + Sync {
    /// Short backend name for logs and the health endpoint.
    fn name(&self) -> &'static str;

    /// Fetch the stored composite record, if any.
    async fn load(&self) -> Option<PopupState>;

    /// Write the full composite record (always both fields together, so a
    /// one-field update cannot lose the sibling field).
    async fn save(&self, state: &PopupState) -> Result<(), BackendError>;
}

/// The on-disk / remote record layout.
///
/// `updatedAt` is written on every save and ignored on load (it is not
/// authoritative for readers).
#[derive(Debug, Serialize)]
struct PersistedRecord<'a> {
    show: bool,
    content: &'a str,
    #[serde(rename = "updatedAt")]
    updated_at: DateTime<Utc>,
}

impl<'a> PersistedRecord<'a> {
    fn new(state: &'a PopupState) -> Self {
        Self {
            show: state.show,
            content: &state.content,
            updated_at: Utc::now(),
        }
    }
}

/// Select the persistence backend from configuration.
///
/// Checked once at startup, not hot-reloaded: remote credentials present →
/// remote backend exclusively; otherwise the file backend at its fixed
/// relative path. The in-memory backend is never chosen here; it is for
/// tests and embedded callers via `PopupStore::in_memory`.
pub fn select_backend(config: &StoreConfig) -> Arc<dyn StateBackend> {
    if config.remote_configured() {
        let url = config.kv_url.clone().unwrap_or_default();
        let token = config.kv_token.clone().unwrap_or_default();
        tracing::info!(backend = "remote", "Using remote key-value persistence");
        Arc::new(RemoteBackend::new(url, token))
    } else {
        tracing::info!(
            backend = "file",
            path = file::STATE_FILE,
            "Using local file persistence"
        );
        Arc::new(FileBackend::default())
    }
}
