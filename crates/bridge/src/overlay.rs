//! The overlay state machine: Hidden or Visible, driven by polls.
//!
//! ```text
//! Hidden --poll show=true--> Visible --poll show=false / dismiss--> Hidden
//! ```
//!
//! While Visible, content changes update the displayed text in place; the
//! machine never passes through Hidden for a content-only change, so the
//! modal is not remounted (no flicker). Poll failures map to the hidden
//! default before reaching the machine (fail-closed).

use std::time::Duration;

use popsync_core::PopupState;

/// Fixed interval between widget state polls.
pub const POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Text shown when the popup is on but the content is blank.
pub const FALLBACK_TEXT: &str = "Turn the switch off on the dashboard to close.";

/// Whether the modal overlay is currently mounted, and with what text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    /// No modal on screen.
    Hidden,
    /// Modal on screen displaying `content`.
    Visible { content: String },
}

impl Overlay {
    /// Merge a polled state into the machine.
    ///
    /// Callers that experienced a fetch failure pass the default (hidden)
    /// state, which is what makes polling fail-closed.
    pub fn apply_poll(&mut self, state: PopupState) {
        if !state.show {
            *self = Overlay::Hidden;
            return;
        }
        match self {
            // Update the text in place; the modal stays mounted.
            Overlay::Visible { content } => *content = state.content,
            Overlay::Hidden => {
                *self = Overlay::Visible {
                    content: state.content,
                }
            }
        }
    }

    /// Hide locally after a user dismiss. Returns whether a modal was
    /// actually dismissed (and so whether `show=false` should be posted).
    pub fn dismiss(&mut self) -> bool {
        let was_visible = matches!(self, Overlay::Visible { .. });
        *self = Overlay::Hidden;
        was_visible
    }

    /// The text to display, if the modal is up. Blank content falls back
    /// to [`FALLBACK_TEXT`].
    pub fn display_text(&self) -> Option<&str> {
        match self {
            Overlay::Hidden => None,
            Overlay::Visible { content } => {
                let trimmed = content.trim();
                Some(if trimmed.is_empty() {
                    FALLBACK_TEXT
                } else {
                    content
                })
            }
        }
    }
}

impl Default for Overlay {
    fn default() -> Self {
        Overlay::Hidden
    }
}
