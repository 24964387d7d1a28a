//! Widget runner: terminal setup, poll loop, and the dismiss control.
//!
//! Without a configured client the runner performs no network activity;
//! the poll task is simply never spawned and the overlay stays Hidden.

use std::io;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use futures::StreamExt;
use ratatui::prelude::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;

use popsync_client::ApiClient;
use popsync_core::PopupState;

use crate::overlay::{Overlay, POLL_INTERVAL};
use crate::ui;

/// One iteration's outcome of the main select loop.
enum Step {
    /// The poll interval elapsed.
    PollDue,
    /// A poll task reported a (fail-closed) state.
    Polled(PopupState),
    /// A terminal event (or stream end) arrived.
    Input(Option<io::Result<Event>>),
}

/// The embedded widget TUI runner.
pub struct BridgeTui {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    overlay: Overlay,
    client: Option<ApiClient>,
    tx: mpsc::UnboundedSender<PopupState>,
    rx: mpsc::UnboundedReceiver<PopupState>,
}

impl BridgeTui {
    /// Create the runner, entering raw mode and the alternate screen.
    ///
    /// `client` is `None` when no base URL is configured; the widget then
    /// stays permanently Hidden.
    pub fn new(client: Option<ApiClient>) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        let (tx, rx) = mpsc::unbounded_channel();

        Ok(Self {
            terminal,
            overlay: Overlay::Hidden,
            client,
            tx,
            rx,
        })
    }

    /// Run the event loop until the user quits.
    pub async fn run(&mut self) -> io::Result<()> {
        let mut poll = tokio::time::interval(POLL_INTERVAL);
        let mut events = EventStream::new();
        let connected = self.client.is_some();

        loop {
            let overlay = &self.overlay;
            self.terminal
                .draw(|frame| ui::render(frame, overlay, connected))?;

            // The select only produces a value; handling happens below so
            // the arms never borrow `self` beyond the channel receiver.
            let step = tokio::select! {
                _ = poll.tick() => Step::PollDue,
                Some(polled) = self.rx.recv() => Step::Polled(polled),
                maybe = events.next() => Step::Input(maybe),
            };

            match step {
                Step::PollDue => self.spawn_poll(),
                Step::Polled(polled) => self.overlay.apply_poll(polled),
                Step::Input(Some(Ok(Event::Key(key)))) if key.kind == KeyEventKind::Press => {
                    if self.on_key(key) {
                        break;
                    }
                }
                Step::Input(Some(Ok(_))) => {}
                Step::Input(Some(Err(_)) | None) => break,
            }
        }

        self.restore()
    }

    /// Handle one key press. Returns `true` to quit.
    fn on_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }

        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('d') | KeyCode::Esc => {
                // Dismiss writes shared state: the widget is a writer here,
                // not just a reader. Hide locally either way.
                if self.overlay.dismiss() {
                    self.spawn_dismiss_write();
                }
            }
            _ => {}
        }
        false
    }

    /// Spawn one fail-closed poll: any fetch failure is reported as the
    /// hidden default. No cancellation; a new poll starts regardless of
    /// whether the previous one resolved.
    fn spawn_poll(&self) {
        let Some(client) = self.client.clone() else {
            return;
        };
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(client.fetch_state_or_hidden().await);
        });
    }

    /// Spawn the POST behind a dismiss: set `show=false` for every reader.
    fn spawn_dismiss_write(&self) {
        let Some(client) = self.client.clone() else {
            return;
        };
        tokio::spawn(async move {
            if let Err(e) = client.set_show(false).await {
                tracing::debug!(error = %e, "Dismiss write failed; popup stays hidden locally");
            }
        });
    }

    /// Restore the terminal to its normal state.
    fn restore(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for BridgeTui {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
    }
}
