//! Widget rendering: a neutral host backdrop with a centered modal overlay.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::overlay::Overlay;

/// Render the host page stand-in and, when Visible, the modal on top.
pub fn render(frame: &mut Frame, overlay: &Overlay, connected: bool) {
    render_host_page(frame, connected);

    if let Some(text) = overlay.display_text() {
        render_modal(frame, text);
    }
}

/// Render the backdrop representing the embedding page.
fn render_host_page(frame: &mut Frame, connected: bool) {
    let hint = if connected {
        "Host page -- the popup appears here when the dashboard toggle is on.\n\nd/Esc dismiss | q quit"
    } else {
        "Host page -- no POPUP_API_URL configured; the widget stays hidden.\n\nq quit"
    };
    let backdrop = Paragraph::new(hint)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL).title("Embedding page"));
    frame.render_widget(backdrop, frame.area());
}

/// Render the centered modal with the popup text.
fn render_modal(frame: &mut Frame, text: &str) {
    let area = centered_rect(frame.area(), 50, 40);

    // Clear whatever the backdrop drew underneath the modal.
    frame.render_widget(Clear, area);

    let modal = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Popup")
                .border_style(Style::default().fg(Color::Cyan)),
        );
    frame.render_widget(modal, area);
}

/// A rectangle centered in `area` taking the given percentages of each axis.
fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
