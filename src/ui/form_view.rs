//! Contact form rendering

use super::widgets::{draw_field, faded, offset, render_button, FieldLook, BUTTON_HEIGHT};
use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use stepform::dom::{Document, ElementId, Selector, StyleProp};
use stepform::form::controller::{FOCUSED, HAS_VALUE, INVALID, LOADING, VALID};
use stepform::form::progress::{ACTIVE, COMPLETED};
use stepform::form::{FieldBinding, FieldKind, StepDescriptor};

/// Vertical slot inside a step
enum Row {
    Input { field: ElementId, height: u16 },
    Toggle(ElementId),
    Error(ElementId),
    Buttons(Vec<ElementId>),
}

impl Row {
    fn height(&self) -> u16 {
        match self {
            Row::Input { height, .. } => *height,
            Row::Toggle(_) | Row::Error(_) => 1,
            Row::Buttons(_) => BUTTON_HEIGHT,
        }
    }
}

fn label_of(doc: &Document, binding: &FieldBinding) -> String {
    doc.element(binding.element)
        .attr("aria-label")
        .or(binding.name.as_deref())
        .unwrap_or_default()
        .to_string()
}

/// Controls inside `scope`, in document order
fn buttons_in(app: &App, scope: ElementId) -> Vec<ElementId> {
    let layout = app.form.layout();
    app.page
        .document()
        .descendants(scope)
        .into_iter()
        .filter(|el| layout.control(*el).is_some())
        .collect()
}

fn rows(app: &App, step: &StepDescriptor) -> Vec<Row> {
    let layout = app.form.layout();
    let fields: Vec<&FieldBinding> = step
        .fields
        .iter()
        .filter_map(|f| layout.binding(*f))
        .filter(|b| b.kind != FieldKind::Hidden)
        .collect();

    let mut rows = Vec::new();
    for (i, binding) in fields.iter().enumerate() {
        rows.push(match binding.kind {
            FieldKind::Textarea => Row::Input {
                field: binding.element,
                height: 5,
            },
            FieldKind::Checkbox | FieldKind::Radio => Row::Toggle(binding.element),
            _ => Row::Input {
                field: binding.element,
                height: 3,
            },
        });
        // one error line per group, after its last field
        let closes_group = fields.get(i + 1).map_or(true, |next| next.error != binding.error);
        if let Some(slot) = binding.error.filter(|_| closes_group) {
            rows.push(Row::Error(slot));
        }
    }
    rows.push(Row::Buttons(buttons_in(app, step.container)));
    rows
}

/// Markers joined by segments on a single line
pub fn draw_progress(frame: &mut Frame, area: Rect, app: &App) {
    let doc = app.page.document();
    let progress = &app.form.layout().progress;
    let Some(container) = progress.container else {
        return;
    };
    if doc.element(container).is_hidden() {
        return;
    }

    let mut spans = Vec::new();
    for (i, marker) in progress.markers.iter().enumerate() {
        let el = doc.element(*marker);
        let (glyph, style) = if el.has_class(ACTIVE) {
            (
                el.text().to_string(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )
        } else if el.has_class(COMPLETED) {
            ("✓".to_string(), Style::default().fg(Color::Green))
        } else {
            (el.text().to_string(), Style::default().fg(Color::DarkGray))
        };
        spans.push(Span::styled(format!(" {glyph} "), style));

        if let Some(segment) = progress.segments.get(i) {
            let color = if doc.element(*segment).has_class(COMPLETED) {
                Color::Green
            } else {
                Color::DarkGray
            };
            spans.push(Span::styled("────", Style::default().fg(color)));
        }
    }

    let opacity = doc.element(container).style(StyleProp::Opacity);
    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .style(faded(opacity)),
        area,
    );
}

/// Draw the visible step, following its slide and fade
pub fn draw_step(frame: &mut Frame, bounds: Rect, app: &App, step: &StepDescriptor) {
    let doc = app.page.document();
    let container = doc.element(step.container);
    let opacity = container.style(StyleProp::Opacity);
    if opacity < 0.05 {
        return;
    }
    let area = offset(bounds, bounds, container.style(StyleProp::X), 0.0);

    let title = doc
        .query(step.container, &Selector::tag("h3"))
        .map(|h| doc.element(h).text())
        .unwrap_or_default();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(
            " {title} ({}/{}) ",
            step.index,
            app.form.step_count()
        ));
    let inner = block.inner(area);
    frame.render_widget(block.style(faded(opacity)), area);

    let rows = rows(app, step);
    let mut constraints: Vec<Constraint> = rows.iter().map(|r| Constraint::Length(r.height())).collect();
    constraints.push(Constraint::Min(0));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (row, chunk) in rows.iter().zip(chunks.iter()) {
        match row {
            Row::Input { field, height } => draw_input(frame, *chunk, app, *field, *height > 3),
            Row::Toggle(field) => draw_toggle(frame, *chunk, app, *field),
            Row::Error(slot) => draw_error(frame, *chunk, doc, *slot),
            Row::Buttons(buttons) => draw_buttons(frame, *chunk, app, buttons),
        }
    }
}

fn draw_input(frame: &mut Frame, area: Rect, app: &App, field: ElementId, multiline: bool) {
    let doc = app.page.document();
    let Some(binding) = app.form.layout().binding(field) else {
        return;
    };
    let el = doc.element(field);
    let group = binding.group.map(|g| doc.element(g));
    let label_raised = !binding.floating
        || group.is_some_and(|g| g.has_class(HAS_VALUE) || g.has_class(FOCUSED));

    let look = FieldLook {
        focused: doc.focused() == Some(field),
        valid: el.has_class(VALID),
        invalid: el.has_class(INVALID),
        label_raised,
        multiline,
    };
    draw_field(frame, area, &label_of(doc, binding), el.value(), look);
}

fn draw_toggle(frame: &mut Frame, area: Rect, app: &App, field: ElementId) {
    let doc = app.page.document();
    let Some(binding) = app.form.layout().binding(field) else {
        return;
    };
    let el = doc.element(field);
    let mark = match (&binding.kind, el.is_checked()) {
        (FieldKind::Radio, true) => "(•)",
        (FieldKind::Radio, false) => "( )",
        (_, true) => "[x]",
        (_, false) => "[ ]",
    };
    let style = if doc.focused() == Some(field) {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else if el.has_class(INVALID) {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };
    let line = format!(" {mark} {}", label_of(doc, binding));
    frame.render_widget(Paragraph::new(line).style(style), area);
}

fn draw_error(frame: &mut Frame, area: Rect, doc: &Document, slot: ElementId) {
    let el = doc.element(slot);
    if el.text().is_empty() {
        return;
    }
    let style = faded(el.style(StyleProp::Opacity)).fg(Color::Red);
    frame.render_widget(Paragraph::new(format!(" {}", el.text())).style(style), area);
}

fn draw_buttons(frame: &mut Frame, area: Rect, app: &App, buttons: &[ElementId]) {
    let doc = app.page.document();
    let labels: Vec<String> = buttons
        .iter()
        .map(|b| {
            let el = doc.element(*b);
            if el.has_class(LOADING) {
                "Sending...".to_string()
            } else {
                el.text().to_string()
            }
        })
        .collect();
    let mut constraints: Vec<Constraint> = labels
        .iter()
        .map(|l| Constraint::Length(l.chars().count() as u16 + 4))
        .collect();
    constraints.push(Constraint::Min(0));
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for ((button, label), chunk) in buttons.iter().zip(&labels).zip(chunks.iter()) {
        let el = doc.element(*button);
        render_button(
            frame,
            *chunk,
            label,
            doc.focused() == Some(*button),
            !el.is_disabled(),
        );
    }
}

/// Draw the confirmation shown after delivery
pub fn draw_success(frame: &mut Frame, bounds: Rect, app: &App) {
    let doc = app.page.document();
    let Some(success) = app.form.layout().success else {
        return;
    };
    let view = doc.element(success);
    if view.is_hidden() {
        return;
    }
    let area = offset(bounds, bounds, 0.0, view.style(StyleProp::Y));

    let lines: Vec<Line> = doc
        .descendants(success)
        .into_iter()
        .map(|id| doc.element(id))
        .filter(|el| el.tag() != "button" && !el.text().is_empty())
        .map(|el| {
            if el.tag() == "h3" {
                Line::from(Span::styled(
                    el.text().to_string(),
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(el.text().to_string())
            }
        })
        .collect();
    let text_height = lines.len() as u16 + 1;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    let inner = block.inner(area);
    frame.render_widget(block.style(faded(view.style(StyleProp::Opacity))), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(text_height),
            Constraint::Length(BUTTON_HEIGHT),
            Constraint::Min(0),
        ])
        .split(inner);
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), chunks[0]);
    draw_buttons(frame, chunks[1], app, &buttons_in(app, success));
}

/// Form-wide submission error, when shown
pub fn draw_global_error(frame: &mut Frame, area: Rect, app: &App) {
    let doc = app.page.document();
    let Some(slot) = app.form.layout().global_error else {
        return;
    };
    if doc.element(slot).is_hidden() {
        return;
    }
    draw_error(frame, area, doc, slot);
}
