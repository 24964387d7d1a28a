//! The popup state store: one cached record, one injected backend.
//!
//! [`PopupStore`] is constructed once at process start and shared via `Arc`.
//! Every operation first ensures the backend has been loaded exactly once,
//! then reads or mutates the cached value; mutations additionally persist
//! through the backend.
//!
//! Persistence is best-effort and asynchronous: mutations spawn a write that
//! neither blocks the caller nor guarantees success: on failure the cache
//! still reflects the new value for the rest of the process lifetime, it
//! just will not survive a restart. Callers that need durability await
//! [`PopupStore::flush`] instead. Last writer wins everywhere; there is no
//! version check against concurrent writers on the shared backend.

use std::sync::Arc;

use tokio::sync::{OnceCell, RwLock};

use crate::backend::{select_backend, MemoryBackend, StateBackend};
use crate::config::StoreConfig;
use crate::error::BackendError;
use crate::state::{PopupState, StateUpdate};

/// Shared holder for the singleton [`PopupState`].
pub struct PopupStore {
    backend: Arc<dyn StateBackend>,
    state: Arc<RwLock<PopupState>>,
    init: OnceCell<()>,
}

impl PopupStore {
    /// Create a store over an explicit backend strategy.
    pub fn new(backend: Arc<dyn StateBackend>) -> Self {
        Self {
            backend,
            state: Arc::new(RwLock::new(PopupState::default())),
            init: OnceCell::new(),
        }
    }

    /// A store with no persistence at all (state dies with the process).
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend))
    }

    /// A store over the backend selected by environment configuration.
    pub fn from_env() -> Self {
        Self::new(select_backend(&StoreConfig::from_env()))
    }

    /// Short name of the active backend, for logs and health reporting.
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Load from the backend exactly once, on first access.
    async fn ensure_loaded(&self) {
        self.init
            .get_or_init(|| async {
                if let Some(loaded) = self.backend.load().await {
                    *self.state.write().await = loaded;
                }
            })
            .await;
    }

    /// Current visibility flag.
    pub async fn show(&self) -> bool {
        self.ensure_loaded().await;
        self.state.read().await.show
    }

    /// Current popup content.
    pub async fn content(&self) -> String {
        self.ensure_loaded().await;
        self.state.read().await.content.clone()
    }

    /// Snapshot of the full record.
    pub async fn state(&self) -> PopupState {
        self.ensure_loaded().await;
        self.state.read().await.clone()
    }

    /// Set the visibility flag and persist best-effort.
    pub async fn set_show(&self, show: bool) {
        self.ensure_loaded().await;
        self.state.write().await.show = show;
        self.spawn_persist();
    }

    /// Set the popup content and persist best-effort.
    pub async fn set_content(&self, content: &str) {
        self.ensure_loaded().await;
        self.state.write().await.content = content.to_string();
        self.spawn_persist();
    }

    /// Apply a partial update and return the resulting snapshot.
    ///
    /// Both fields are mutated under one write lock and persisted with a
    /// single best-effort write; an empty update touches nothing.
    pub async fn apply(&self, update: &StateUpdate) -> PopupState {
        self.ensure_loaded().await;

        let snapshot = {
            let mut state = self.state.write().await;
            state.apply(update);
            state.clone()
        };

        if !update.is_empty() {
            self.spawn_persist();
        }

        snapshot
    }

    /// Write the current state through the backend and surface the result.
    ///
    /// This is the completion signal for callers that need durability
    /// (tests, shutdown); regular mutations never await it.
    pub async fn flush(&self) -> Result<(), BackendError> {
        self.ensure_loaded().await;
        let snapshot = self.state.read().await.clone();
        self.backend.save(&snapshot).await
    }

    /// Spawn a fire-and-forget write of the cache to the backend.
    ///
    /// The snapshot is taken when the task runs, not when it is spawned, so
    /// out-of-order task scheduling still ends with the newest value on the
    /// backend.
    fn spawn_persist(&self) {
        let backend = Arc::clone(&self.backend);
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            let snapshot = state.read().await.clone();
            if let Err(e) = backend.save(&snapshot).await {
                tracing::warn!(
                    backend = backend.name(),
                    error = %e,
                    "Best-effort state persist failed; cache keeps the new value"
                );
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn defaults_before_any_write() {
        let store = PopupStore::in_memory();
        assert!(!store.show().await);
        assert_eq!(store.content().await, "");
    }

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let store = PopupStore::in_memory();

        store.set_show(true).await;
        assert!(store.show().await);

        store.set_content("Hello").await;
        assert_eq!(store.content().await, "Hello");

        store.set_show(false).await;
        assert!(!store.show().await);
        assert_eq!(store.content().await, "Hello");
    }

    #[tokio::test]
    async fn apply_patches_only_named_fields() {
        let store = PopupStore::in_memory();
        store.set_content("Hello").await;

        let after = store.apply(&StateUpdate::show(true)).await;
        assert!(after.show);
        assert_eq!(after.content, "Hello");

        let after = store.apply(&StateUpdate::default()).await;
        assert_eq!(after, store.state().await);
    }
}
