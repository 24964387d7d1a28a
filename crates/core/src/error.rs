//! Error types for the persistence layer.
//!
//! Backend failures are best-effort by contract: the store swallows them and
//! keeps serving the cached value. [`BackendError`] exists so that callers
//! which explicitly await durability (via `PopupStore::flush`) get a
//! `Result` they can inspect.

/// A failure while loading from or saving to a persistence backend.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// Filesystem read/write failed (missing directory, read-only fs, ...).
    #[error("file backend I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The remote key-value store rejected the request or was unreachable.
    #[error("remote backend request failed: {0}")]
    Remote(#[from] reqwest::Error),

    /// A stored payload could not be serialized.
    #[error("state serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}
