//! Dashboard rendering: header with the toggle, content editor, status bar.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::DashboardApp;

/// Render the full dashboard frame.
pub fn render(frame: &mut Frame, app: &DashboardApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header with toggle
            Constraint::Min(5),    // content editor
            Constraint::Length(1), // status / key hints
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);
    render_editor(frame, chunks[1], app);
    render_status(frame, chunks[2], app);
}

/// Render the title line and the popup toggle.
fn render_header(frame: &mut Frame, area: Rect, app: &DashboardApp) {
    let toggle = if app.show {
        Span::styled(" ON ", Style::default().fg(Color::Black).bg(Color::Green))
    } else {
        Span::styled(" OFF ", Style::default().fg(Color::White).bg(Color::DarkGray))
    };

    let mut spans = vec![
        Span::styled("Popup dashboard", Style::default().bold()),
        Span::raw("   Show popup: "),
        toggle,
    ];
    // No badge until the first poll resolves.
    if app.online == Some(false) {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(
            "offline",
            Style::default().fg(Color::Red).bold(),
        ));
    }

    let header = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

/// Render the content editor and position the cursor inside it.
fn render_editor(frame: &mut Frame, area: Rect, app: &DashboardApp) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Popup content");
    let inner = block.inner(area);

    let editor = Paragraph::new(app.editor.text())
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(editor, area);

    // Clamp here: the editor counts in usize and the cursor may sit far
    // outside the viewport.
    let (line, col) = app.editor.cursor_line_col();
    if line < inner.height as usize && col < inner.width as usize {
        frame.set_cursor_position((inner.x + col as u16, inner.y + line as u16));
    }
}

/// Render the status line: saving indicator and key hints.
fn render_status(frame: &mut Frame, area: Rect, app: &DashboardApp) {
    let text = if app.editor.save_pending() {
        " Saving…   Ctrl-T toggle | Esc quit"
    } else {
        " Ctrl-T toggle | Esc quit"
    };
    let status = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(status, area);
}
