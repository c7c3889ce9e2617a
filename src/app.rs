//! Application state for the terminal host

use anyhow::{anyhow, Result};
use crossterm::event::{KeyCode, KeyEvent};
use std::sync::Arc;
use std::time::{Duration, Instant};
use stepform::dom::{Document, ElementId};
use stepform::form::{FieldKind, Submission};
use stepform::{
    templates, FormConfig, FormEvent, MultiStepForm, Navigation, Page, Reaction, SubmissionSink,
    SubmitOutcome,
};
use tokio::sync::mpsc;

/// How long after the last key press animations are redrawn at full rate
const FAST_REDRAW_WINDOW: Duration = Duration::from_millis(600);

pub struct App {
    pub page: Page,
    pub form: MultiStepForm,
    sink: Arc<dyn SubmissionSink>,
    results_tx: mpsc::UnboundedSender<Result<()>>,
    results_rx: mpsc::UnboundedReceiver<Result<()>>,
    pub status_message: Option<String>,
    last_interaction: Instant,
}

impl App {
    pub fn new(config: FormConfig, sink: Arc<dyn SubmissionSink>) -> Result<Self> {
        let mut document = Document::new();
        let form = templates::contact_form(&mut document);
        let mut page = Page::new(document);
        let form = MultiStepForm::attach(&mut page, form, config)?
            .ok_or_else(|| anyhow!("contact form has no steps"))?;
        let (results_tx, results_rx) = mpsc::unbounded_channel();

        let mut app = Self {
            page,
            form,
            sink,
            results_tx,
            results_rx,
            status_message: None,
            last_interaction: Instant::now(),
        };
        app.ensure_focus();
        Ok(app)
    }

    /// Elements reachable with Tab in the visible view, in document order
    pub fn focusables(&self) -> Vec<ElementId> {
        let doc = self.page.document();
        let layout = self.form.layout();
        let scope = if self.form.is_delivered() {
            layout.success
        } else {
            layout.step(self.form.current_step()).map(|s| s.container)
        };
        let Some(scope) = scope else {
            return Vec::new();
        };

        doc.descendants(scope)
            .into_iter()
            .filter(|el| {
                layout.control(*el).is_some()
                    || layout
                        .binding(*el)
                        .is_some_and(|b| b.kind != FieldKind::Hidden)
            })
            .filter(|el| doc.is_rendered(*el))
            .collect()
    }

    /// Redraw at animation rate while something is moving
    pub fn wants_fast_redraw(&self) -> bool {
        self.form.is_transitioning()
            || self.form.is_busy()
            || self.last_interaction.elapsed() < FAST_REDRAW_WINDOW
    }

    /// Advance animations by `dt` and settle finished submissions
    pub fn tick(&mut self, dt: Duration) {
        let finished = self.page.tick(dt);
        if !finished.is_empty() {
            self.form.on_animations_complete(&mut self.page, &finished);
        }

        while let Ok(result) = self.results_rx.try_recv() {
            let outcome = self.form.finish_submission(&mut self.page, result);
            self.report(outcome);
        }

        let batches = self.page.document_mut().take_mutations();
        if !batches.is_empty() {
            tracing::trace!("{} mutation batches committed", batches.len());
        }
        self.ensure_focus();
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::Down => return self.move_focus(true),
            KeyCode::BackTab | KeyCode::Up => return self.move_focus(false),
            _ => {}
        }

        let Some(element) = self.page.document().focused() else {
            return;
        };
        let kind = self
            .form
            .layout()
            .binding(element)
            .map(|b| b.kind.clone());

        match (key.code, kind) {
            (KeyCode::Enter | KeyCode::Char(' '), None) => self.dispatch(FormEvent::Click(element)),
            (KeyCode::Char(' '), Some(FieldKind::Checkbox)) => {
                let checked = !self.page.document().element(element).is_checked();
                self.dispatch(FormEvent::Toggle {
                    field: element,
                    checked,
                });
            }
            (KeyCode::Char(' ') | KeyCode::Enter, Some(FieldKind::Radio)) => {
                self.dispatch(FormEvent::Toggle {
                    field: element,
                    checked: true,
                });
            }
            (KeyCode::Enter, Some(FieldKind::Textarea)) => self.edit(element, |v| v.push('\n')),
            (KeyCode::Enter, Some(_)) => self.dispatch(FormEvent::Submit),
            (KeyCode::Char(c), Some(kind)) if !kind.is_toggle() => {
                self.edit(element, |v| v.push(c));
            }
            (KeyCode::Backspace, Some(kind)) if !kind.is_toggle() => {
                self.edit(element, |v| {
                    v.pop();
                });
            }
            _ => {}
        }
    }

    fn edit(&mut self, field: ElementId, f: impl FnOnce(&mut String)) {
        let mut value = self.page.document().element(field).value().to_string();
        f(&mut value);
        self.dispatch(FormEvent::Input { field, value });
    }

    fn dispatch(&mut self, event: FormEvent) {
        self.last_interaction = Instant::now();
        match self.form.handle_event(&mut self.page, event) {
            Reaction::SubmitRequested => self.start_submission(),
            Reaction::Navigated(Navigation::Blocked) => {
                self.status_message = Some("Please fix the highlighted fields".to_string());
            }
            Reaction::Navigated(Navigation::Started { to, .. }) => {
                self.status_message = Some(format!("Step {to} of {}", self.form.step_count()));
            }
            Reaction::Navigated(Navigation::Unchanged) | Reaction::Handled | Reaction::Ignored => {}
        }
    }

    fn start_submission(&mut self) {
        match self.form.prepare_submission(&mut self.page) {
            Submission::Ready(payload) => {
                self.status_message = Some("Sending...".to_string());
                let sink = Arc::clone(&self.sink);
                let tx = self.results_tx.clone();
                tokio::spawn(async move {
                    let result = sink.submit(payload).await;
                    if tx.send(result).is_err() {
                        tracing::warn!("Submission finished after shutdown");
                    }
                });
            }
            Submission::Settled(outcome) => self.report(outcome),
        }
    }

    fn report(&mut self, outcome: SubmitOutcome) {
        tracing::debug!("Submission outcome: {outcome:?}");
        self.status_message = match outcome {
            SubmitOutcome::Delivered => Some("Message sent".to_string()),
            SubmitOutcome::Rejected => self.form.submission_error().map(str::to_string),
            SubmitOutcome::Invalid { step } => Some(format!("Step {step} needs attention")),
            SubmitOutcome::Deferred => self.status_message.take(),
            SubmitOutcome::Discarded | SubmitOutcome::Ignored => None,
        };
    }

    fn move_focus(&mut self, forward: bool) {
        let items = self.focusables();
        if items.is_empty() {
            return;
        }
        let current = self
            .page
            .document()
            .focused()
            .and_then(|f| items.iter().position(|el| *el == f));
        let next = match current {
            Some(i) if forward => (i + 1) % items.len(),
            Some(i) => (i + items.len() - 1) % items.len(),
            None => 0,
        };
        self.focus_element(items[next]);
    }

    fn focus_element(&mut self, target: ElementId) {
        if let Some(previous) = self.page.document().focused() {
            if previous != target {
                self.dispatch(FormEvent::Blur(previous));
            }
        }
        if self.form.layout().binding(target).is_some() {
            self.dispatch(FormEvent::Focus(target));
        } else {
            self.page.document_mut().focus(Some(target));
        }
    }

    /// Keep focus inside the visible view
    fn ensure_focus(&mut self) {
        if self.form.is_transitioning() {
            return;
        }
        let items = self.focusables();
        let focused = self.page.document().focused();
        if focused.is_some_and(|f| items.contains(&f)) {
            return;
        }
        if let Some(first) = items.first() {
            if self.form.layout().binding(*first).is_some() {
                // no blur: the previous element is no longer visible
                if let Err(err) = self.form.focus(&mut self.page, *first) {
                    tracing::debug!("Focus failed: {err}");
                }
            } else {
                self.page.document_mut().focus(Some(*first));
            }
        }
    }
}
