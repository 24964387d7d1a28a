//! Operator dashboard for the popup state.
//!
//! A terminal UI that shows the current toggle and content, lets the
//! operator flip the popup on/off and edit its text, and keeps the server
//! informed: toggles post immediately (optimistically), content saves are
//! debounced. A fixed-interval poll loop keeps the view fresh without ever
//! clobbering in-progress edits.
//!
//! The state machines ([`app::DashboardApp`], [`editor::Editor`]) are
//! I/O-free and take `Instant`s as parameters so tests inject time;
//! [`tui::DashboardTui`] owns the terminal, the poll loop, and the spawned
//! network tasks.

pub mod app;
pub mod editor;
pub mod tui;
pub mod ui;
