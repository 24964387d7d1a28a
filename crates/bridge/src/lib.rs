//! Embedded popup widget.
//!
//! Stands in for the script a third-party page would embed: it polls the
//! state API every two seconds and shows or hides a modal overlay over a
//! neutral host backdrop. Polling fails closed (any fetch failure hides
//! the popup), and the dismiss control writes `show=false` back to the
//! shared state before hiding locally. With no base URL configured the
//! widget performs no network activity at all and stays Hidden.

pub mod overlay;
pub mod tui;
pub mod ui;
