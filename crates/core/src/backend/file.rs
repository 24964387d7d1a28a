//! Local filesystem backend.
//!
//! Persists the popup state as a small JSON file at a fixed relative path,
//! creating parent directories on demand. Loads are fully lenient: a missing
//! file, unreadable data, or a malformed payload all yield `None` so the
//! store falls back to defaults. Saves are serialized through an internal
//! mutex so concurrent best-effort writes cannot tear the file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::BackendError;
use crate::state::PopupState;

use super::{PersistedRecord, StateBackend};

/// Fixed relative path for the persisted state file.
pub const STATE_FILE: &str = "data/popup-state.json";

/// Filesystem-backed persistence at a configurable path.
pub struct FileBackend {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileBackend {
    /// Create a backend writing to the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// The path this backend reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileBackend {
    /// A backend at the fixed relative path [`STATE_FILE`].
    fn default() -> Self {
        Self::new(STATE_FILE)
    }
}

#[async_trait]
impl StateBackend for FileBackend {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn load(&self) -> Option<PopupState> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "No persisted state file");
                return None;
            }
        };

        match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(value) => Some(PopupState::from_value(&value)),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Persisted state file is malformed, using defaults");
                None
            }
        }
    }

    async fn save(&self, state: &PopupState) -> Result<(), BackendError> {
        let _guard = self.write_lock.lock().await;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_string_pretty(&PersistedRecord::new(state))?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}
