//! Dashboard runner: terminal setup, event loop, and network tasks.
//!
//! The loop multiplexes four sources with `tokio::select!`: keyboard events
//! (crossterm's async `EventStream`), the fixed-interval poll tick, a fast
//! tick that checks the editor's debounce deadline, and completions from
//! spawned network tasks arriving over a channel. Network requests are
//! independent spawned tasks, so they are not guaranteed to resolve in
//! issue order; the optimistic local state in [`DashboardApp`] is the
//! presentation source of truth precisely because of that.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use futures::StreamExt;
use ratatui::prelude::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;

use popsync_client::ApiClient;
use popsync_core::PopupState;

use crate::app::{DashboardApp, POLL_INTERVAL};
use crate::ui;

/// How often the debounce deadline is checked.
const DEBOUNCE_TICK: Duration = Duration::from_millis(100);

/// One iteration's outcome of the main select loop.
enum Step {
    /// The poll interval elapsed.
    PollDue,
    /// The fast tick checking the editor's debounce deadline.
    DebounceTick,
    /// A network task completed.
    Net(NetEvent),
    /// A terminal event (or stream end) arrived.
    Input(Option<io::Result<Event>>),
}

/// A completion delivered by a spawned network task.
enum NetEvent {
    /// A poll finished; `None` means the request failed.
    Polled(Option<PopupState>),
    /// A content save finished, successfully or not.
    SaveFinished,
}

/// The dashboard TUI runner.
///
/// Owns terminal raw mode, the alternate screen, the application state, and
/// the channel the network tasks report on.
pub struct DashboardTui {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    app: DashboardApp,
    client: ApiClient,
    tx: mpsc::UnboundedSender<NetEvent>,
    rx: mpsc::UnboundedReceiver<NetEvent>,
}

impl DashboardTui {
    /// Create the runner, entering raw mode and the alternate screen.
    pub fn new(client: ApiClient) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        let (tx, rx) = mpsc::unbounded_channel();

        Ok(Self {
            terminal,
            app: DashboardApp::new(),
            client,
            tx,
            rx,
        })
    }

    /// Run the event loop until the operator quits.
    pub async fn run(&mut self) -> io::Result<()> {
        let mut poll = tokio::time::interval(POLL_INTERVAL);
        let mut debounce = tokio::time::interval(DEBOUNCE_TICK);
        let mut events = EventStream::new();

        loop {
            let app = &self.app;
            self.terminal.draw(|frame| ui::render(frame, app))?;

            // The select only produces a value; handling happens below so
            // the arms never borrow `self` beyond the channel receiver.
            let step = tokio::select! {
                _ = poll.tick() => Step::PollDue,
                _ = debounce.tick() => Step::DebounceTick,
                Some(event) = self.rx.recv() => Step::Net(event),
                maybe = events.next() => Step::Input(maybe),
            };

            match step {
                Step::PollDue => self.spawn_poll(),
                Step::DebounceTick => {
                    if let Some(text) = self.app.editor.take_due_save(Instant::now()) {
                        self.spawn_save(text);
                    }
                }
                Step::Net(event) => self.on_net_event(event),
                Step::Input(Some(Ok(Event::Key(key)))) if key.kind == KeyEventKind::Press => {
                    if self.on_key(key) {
                        break;
                    }
                }
                Step::Input(Some(Ok(_))) => {} // resize etc.; redrawn next iteration
                Step::Input(Some(Err(_)) | None) => break,
            }
        }

        self.restore()
    }

    // -------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------

    /// Handle one key press. Returns `true` to quit.
    fn on_key(&mut self, key: KeyEvent) -> bool {
        let now = Instant::now();

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => return true,
                KeyCode::Char('t') => {
                    let show = self.app.toggle(now);
                    self.spawn_toggle(show);
                    return false;
                }
                _ => return false,
            }
        }

        match key.code {
            KeyCode::Esc => return true,
            KeyCode::Char(ch) => self.app.editor.insert(ch, now),
            KeyCode::Enter => self.app.editor.insert_newline(now),
            KeyCode::Backspace => self.app.editor.backspace(now),
            KeyCode::Delete => self.app.editor.delete_forward(now),
            KeyCode::Left => self.app.editor.move_left(),
            KeyCode::Right => self.app.editor.move_right(),
            KeyCode::Home => self.app.editor.move_home(),
            KeyCode::End => self.app.editor.move_end(),
            _ => {}
        }
        false
    }

    // -------------------------------------------------------------------
    // Network tasks
    // -------------------------------------------------------------------

    /// Merge a network completion into the application state.
    fn on_net_event(&mut self, event: NetEvent) {
        let now = Instant::now();
        match event {
            NetEvent::Polled(Some(state)) => self.app.poll_succeeded(&state, now),
            NetEvent::Polled(None) => self.app.poll_failed(),
            NetEvent::SaveFinished => self.app.editor.on_save_complete(now),
        }
    }

    /// Spawn one poll request. A new poll starts regardless of whether the
    /// previous one resolved; there is no cancellation.
    fn spawn_poll(&self) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let polled = client.fetch_state().await.ok();
            let _ = tx.send(NetEvent::Polled(polled));
        });
    }

    /// Spawn the POST behind a local toggle. The displayed value is kept
    /// whether or not the request lands.
    fn spawn_toggle(&self, show: bool) {
        let client = self.client.clone();
        tokio::spawn(async move {
            if let Err(e) = client.set_show(show).await {
                tracing::debug!(error = %e, show, "Toggle write failed; keeping local value");
            }
        });
    }

    /// Spawn a debounced content save. Completion clears the indicator
    /// regardless of success.
    fn spawn_save(&self, content: String) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            if let Err(e) = client.save_content(&content).await {
                tracing::debug!(error = %e, "Content save failed");
            }
            let _ = tx.send(NetEvent::SaveFinished);
        });
    }

    // -------------------------------------------------------------------
    // Shutdown
    // -------------------------------------------------------------------

    /// Restore the terminal to its normal state.
    fn restore(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for DashboardTui {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
    }
}
