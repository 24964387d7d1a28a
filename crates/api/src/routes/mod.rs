//! Route modules, one file per endpoint.

pub mod health;
pub mod popup_state;
