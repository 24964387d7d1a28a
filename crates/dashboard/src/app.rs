//! Dashboard application state: the toggle, the editor, and the rules for
//! merging polled server state into both.
//!
//! The toggle is optimistic: a local flip is displayed immediately and kept
//! even if the network request behind it fails. To stop the displayed value
//! flickering back to a stale server read under eventual consistency,
//! poll-driven toggle values are suppressed for a short window after a
//! local flip. The window is a tunable heuristic, not a correctness
//! guarantee; true read-after-write consistency would need a version token
//! the store does not have.

use std::time::{Duration, Instant};

use popsync_core::PopupState;

use crate::editor::Editor;

/// Fixed interval between dashboard state polls.
pub const POLL_INTERVAL: Duration = Duration::from_secs(3);

/// How long after a local toggle the poll loop may not overwrite `show`.
pub const TOGGLE_SUPPRESS_WINDOW: Duration = Duration::from_secs(5);

/// Top-level dashboard state. Performs no I/O.
pub struct DashboardApp {
    /// Displayed toggle value (presentation source of truth).
    pub show: bool,
    /// End of the current poll-suppression window, if one is active.
    suppress_until: Option<Instant>,
    /// The content edit buffer and its save machine.
    pub editor: Editor,
    /// Whether the last poll reached the server. `None` until the first
    /// poll resolves, so the header claims nothing either way at startup.
    pub online: Option<bool>,
}

impl DashboardApp {
    /// Create a dashboard showing the defaults.
    pub fn new() -> Self {
        Self {
            show: false,
            suppress_until: None,
            editor: Editor::new(),
            online: None,
        }
    }

    /// Flip the toggle locally and open the suppression window.
    ///
    /// Returns the new value for the caller to send to the server. The
    /// flip is kept even if that request fails.
    pub fn toggle(&mut self, now: Instant) -> bool {
        self.show = !self.show;
        self.suppress_until = Some(now + TOGGLE_SUPPRESS_WINDOW);
        self.show
    }

    /// Whether poll-driven toggle values are currently being ignored.
    pub fn toggle_suppressed(&self, now: Instant) -> bool {
        self.suppress_until.is_some_and(|until| now < until)
    }

    /// Merge a successful poll into the view.
    ///
    /// The toggle is taken from the server unless suppressed; content goes
    /// through the editor's dirty gate.
    pub fn poll_succeeded(&mut self, state: &PopupState, now: Instant) {
        self.online = Some(true);
        if !self.toggle_suppressed(now) {
            self.show = state.show;
        }
        self.editor.apply_polled(&state.content);
    }

    /// Record a failed poll: keep every displayed value (fail-open) and
    /// light the offline badge until the next successful poll.
    pub fn poll_failed(&mut self) {
        self.online = Some(false);
    }
}

impl Default for DashboardApp {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn polled(show: bool, content: &str) -> PopupState {
        PopupState {
            show,
            content: content.to_string(),
        }
    }

    #[test]
    fn toggle_flips_immediately() {
        let now = Instant::now();
        let mut app = DashboardApp::new();

        assert!(app.toggle(now));
        assert!(app.show);
        assert!(!app.toggle(now));
        assert!(!app.show);
    }

    #[test]
    fn polls_inside_the_window_do_not_overwrite_the_toggle() {
        let now = Instant::now();
        let mut app = DashboardApp::new();
        app.toggle(now);

        // A stale server read arrives one second later.
        app.poll_succeeded(&polled(false, ""), now + Duration::from_secs(1));
        assert!(app.show, "suppression window must protect the local flip");
    }

    #[test]
    fn polls_after_the_window_win_again() {
        let now = Instant::now();
        let mut app = DashboardApp::new();
        app.toggle(now);

        app.poll_succeeded(&polled(false, ""), now + TOGGLE_SUPPRESS_WINDOW);
        assert!(!app.show);
    }

    #[test]
    fn failed_polls_keep_displayed_values_and_set_offline() {
        let now = Instant::now();
        let mut app = DashboardApp::new();
        app.toggle(now);
        app.editor.apply_polled("kept");

        app.poll_failed();
        assert!(app.show);
        assert_eq!(app.editor.text(), "kept");
        assert_eq!(app.online, Some(false));

        app.poll_succeeded(&polled(true, "kept"), now + TOGGLE_SUPPRESS_WINDOW);
        assert_eq!(app.online, Some(true));
    }

    #[test]
    fn connectivity_is_unknown_before_the_first_poll() {
        let app = DashboardApp::new();
        assert_eq!(app.online, None, "no poll has resolved yet");
    }

    #[test]
    fn polled_content_respects_the_dirty_gate() {
        let now = Instant::now();
        let mut app = DashboardApp::new();
        app.editor.insert('x', now);

        app.poll_succeeded(&polled(false, "server"), now);
        assert_eq!(app.editor.text(), "x", "dirty edits win over polls");
    }
}
