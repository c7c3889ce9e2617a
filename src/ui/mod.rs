//! UI module for rendering the TUI

mod form_view;
mod widgets;

use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Widest the form card gets
const CARD_WIDTH: u16 = 64;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(1), // Progress
            Constraint::Min(0),    // Card
            Constraint::Length(1), // Submission error
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    frame.render_widget(
        Paragraph::new(Span::styled(
            "Contact us",
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        chunks[0],
    );
    form_view::draw_progress(frame, chunks[1], app);

    let card = centered(chunks[2], CARD_WIDTH);
    if app.form.is_delivered() {
        form_view::draw_success(frame, card, app);
    } else if let Some(step) = app.form.layout().step(app.form.current_step()) {
        form_view::draw_step(frame, card, app, step);
    }

    form_view::draw_global_error(frame, centered(chunks[3], CARD_WIDTH), app);
    draw_status_bar(frame, chunks[4], app);
}

fn centered(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}

/// Draw the status bar
fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        " Tab/↑↓: move | Space: toggle | Enter: activate | Esc: quit",
        Style::default().fg(Color::DarkGray),
    )];
    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Yellow)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
