//! The content edit buffer and its debounced-save state machine.
//!
//! Edits are buffered locally and sent to the server only after typing
//! pauses. The machine has three states:
//!
//! ```text
//! Clean --edit--> Dirty --deadline fires--> Saving --completes--> Clean
//!                   ^                          |
//!                   +----- edit mid-save ------+  (completion re-arms Dirty)
//! ```
//!
//! The precedence rule lives here too: poll-driven content updates apply to
//! the buffer only while Clean, so local edits always win over incoming
//! polls. Save completion clears the "Saving…" indicator regardless of
//! whether the save succeeded; failures are not surfaced to the operator.

use std::time::{Duration, Instant};

/// Debounce interval between the last keystroke and the save request.
pub const SAVE_DEBOUNCE: Duration = Duration::from_millis(500);

/// Where the edit buffer stands relative to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveState {
    /// Buffer matches the last known server value; polls may overwrite it.
    Clean,
    /// Local edits exist; a save fires once `deadline` passes.
    Dirty { deadline: Instant },
    /// A save is in flight. `reedited` records whether the operator kept
    /// typing after the snapshot was taken.
    Saving { reedited: bool },
}

/// A multi-line edit buffer with cursor movement and debounced saves.
///
/// The buffer is a `Vec<char>` so cursor operations work correctly with
/// multi-byte characters; newlines are plain `'\n'` characters.
pub struct Editor {
    buffer: Vec<char>,
    cursor: usize,
    save_state: SaveState,
}

impl Editor {
    /// Create an empty, clean editor.
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            cursor: 0,
            save_state: SaveState::Clean,
        }
    }

    /// The buffered text.
    pub fn text(&self) -> String {
        self.buffer.iter().collect()
    }

    /// Current machine state.
    pub fn save_state(&self) -> SaveState {
        self.save_state
    }

    /// Whether the "Saving…" indicator should be shown (debounce pending or
    /// save in flight).
    pub fn save_pending(&self) -> bool {
        self.save_state != SaveState::Clean
    }

    /// Cursor position as zero-based (line, column).
    ///
    /// Counted in `usize` so a large buffer cannot overflow; rendering
    /// clamps to the viewport when converting to terminal coordinates.
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let mut line = 0usize;
        let mut col = 0usize;
        for &ch in &self.buffer[..self.cursor] {
            if ch == '\n' {
                line += 1;
                col = 0;
            } else {
                col += 1;
            }
        }
        (line, col)
    }

    // -------------------------------------------------------------------
    // Editing
    // -------------------------------------------------------------------

    /// Insert a character at the cursor.
    pub fn insert(&mut self, ch: char, now: Instant) {
        self.buffer.insert(self.cursor, ch);
        self.cursor += 1;
        self.mark_edited(now);
    }

    /// Insert a line break at the cursor.
    pub fn insert_newline(&mut self, now: Instant) {
        self.insert('\n', now);
    }

    /// Delete the character before the cursor (backspace).
    pub fn backspace(&mut self, now: Instant) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.buffer.remove(self.cursor);
            self.mark_edited(now);
        }
    }

    /// Delete the character at the cursor (forward delete).
    pub fn delete_forward(&mut self, now: Instant) {
        if self.cursor < self.buffer.len() {
            self.buffer.remove(self.cursor);
            self.mark_edited(now);
        }
    }

    /// Move the cursor one position to the left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move the cursor one position to the right.
    pub fn move_right(&mut self) {
        if self.cursor < self.buffer.len() {
            self.cursor += 1;
        }
    }

    /// Move the cursor to the start of the buffer.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Move the cursor to the end of the buffer.
    pub fn move_end(&mut self) {
        self.cursor = self.buffer.len();
    }

    /// Register an edit: (re)arm the debounce deadline, or flag a re-edit
    /// when a save is already in flight.
    fn mark_edited(&mut self, now: Instant) {
        self.save_state = match self.save_state {
            SaveState::Clean | SaveState::Dirty { .. } => SaveState::Dirty {
                deadline: now + SAVE_DEBOUNCE,
            },
            SaveState::Saving { .. } => SaveState::Saving { reedited: true },
        };
    }

    // -------------------------------------------------------------------
    // Save machine
    // -------------------------------------------------------------------

    /// If the debounce deadline has passed, snapshot the buffer for sending
    /// and transition to Saving.
    pub fn take_due_save(&mut self, now: Instant) -> Option<String> {
        match self.save_state {
            SaveState::Dirty { deadline } if now >= deadline => {
                self.save_state = SaveState::Saving { reedited: false };
                Some(self.text())
            }
            _ => None,
        }
    }

    /// Record completion of an in-flight save, successful or not.
    ///
    /// If the operator kept typing mid-save, the machine returns to Dirty
    /// with a fresh deadline so the newer text is sent too.
    pub fn on_save_complete(&mut self, now: Instant) {
        if let SaveState::Saving { reedited } = self.save_state {
            self.save_state = if reedited {
                SaveState::Dirty {
                    deadline: now + SAVE_DEBOUNCE,
                }
            } else {
                SaveState::Clean
            };
        }
    }

    /// Apply server content from a poll. Only a Clean buffer is replaced;
    /// local edits win otherwise. Returns whether the buffer changed.
    pub fn apply_polled(&mut self, content: &str) -> bool {
        if self.save_state != SaveState::Clean {
            return false;
        }
        let incoming: Vec<char> = content.chars().collect();
        if incoming == self.buffer {
            return false;
        }
        self.buffer = incoming;
        self.cursor = self.cursor.min(self.buffer.len());
        true
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}
