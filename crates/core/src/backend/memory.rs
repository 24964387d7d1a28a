//! In-memory (non-persistent) backend.

use async_trait::async_trait;

use crate::error::BackendError;
use crate::state::PopupState;

use super::StateBackend;

/// A backend that stores nothing: state lives only in the store's cache and
/// is lost on restart. Used as the fake strategy in tests and by callers
/// that explicitly opt out of persistence.
#[derive(Debug, Default)]
pub struct MemoryBackend;

#[async_trait]
impl StateBackend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn load(&self) -> Option<PopupState> {
        None
    }

    async fn save(&self, _state: &PopupState) -> Result<(), BackendError> {
        Ok(())
    }
}
