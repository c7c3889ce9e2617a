//! Reusable UI widget helpers

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Document pixels per terminal column when mapping slide offsets
const PX_PER_COLUMN: f32 = 4.0;

/// Document pixels per terminal row
const PX_PER_ROW: f32 = 10.0;

/// Render a bordered button
pub fn render_button(
    frame: &mut Frame,
    area: Rect,
    content: &str,
    is_selected: bool,
    is_enabled: bool,
) {
    let border_style = if is_selected && is_enabled {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let text_style = if !is_enabled {
        Style::default().fg(Color::DarkGray)
    } else if is_selected {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let paragraph = Paragraph::new(format!(" {content} ")).style(text_style);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(paragraph.block(block), area);
}

/// Base style for content at `opacity`
pub fn faded(opacity: f32) -> Style {
    if opacity < 0.6 {
        Style::default().add_modifier(Modifier::DIM)
    } else {
        Style::default()
    }
}

/// Move `area` by a pixel offset, staying inside `bounds`
pub fn offset(area: Rect, bounds: Rect, dx: f32, dy: f32) -> Rect {
    let shift = |origin: u16, delta: f32, size: u16, lo: u16, hi: u16| -> u16 {
        let max = hi.saturating_sub(size).max(lo);
        (origin as i32 + delta.round() as i32).clamp(lo as i32, max as i32) as u16
    };
    Rect {
        x: shift(area.x, dx / PX_PER_COLUMN, area.width, bounds.x, bounds.right()),
        y: shift(area.y, dy / PX_PER_ROW, area.height, bounds.y, bounds.bottom()),
        ..area
    }
}

/// How a text field is drawn
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldLook {
    pub focused: bool,
    pub valid: bool,
    pub invalid: bool,
    /// Label sits in the border rather than inside the box
    pub label_raised: bool,
    pub multiline: bool,
}

/// Draw a text field with its label
pub fn draw_field(frame: &mut Frame, area: Rect, label: &str, value: &str, look: FieldLook) {
    let border_style = if look.invalid {
        Style::default().fg(Color::Red)
    } else if look.focused {
        Style::default().fg(Color::Cyan)
    } else if look.valid {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let cursor = if look.focused { "▌" } else { "" };
    let cursor_style = Style::default().fg(Color::Cyan);

    let mut lines: Vec<Line> = if value.is_empty() && !look.label_raised {
        vec![Line::from(Span::styled(
            label.to_string(),
            Style::default().fg(Color::DarkGray),
        ))]
    } else if look.multiline {
        value.split('\n').map(|l| Line::from(l.to_string())).collect()
    } else {
        vec![Line::from(value.to_string())]
    };
    if look.focused {
        if let Some(last) = lines.last_mut() {
            last.spans.push(Span::styled(cursor, cursor_style));
        }
    }

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);
    if look.label_raised {
        block = block.title(format!(" {label} "));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(block),
        area,
    );
}
