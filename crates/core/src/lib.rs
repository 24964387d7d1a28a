//! Popsync core library.
//!
//! Holds the shared popup state model, the pluggable persistence backends
//! (in-memory, local file, remote key-value), and the [`store::PopupStore`]
//! singleton that the API server and tests build on.

pub mod backend;
pub mod config;
pub mod error;
pub mod state;
pub mod store;

pub use state::{PopupState, StateUpdate};
pub use store::PopupStore;
