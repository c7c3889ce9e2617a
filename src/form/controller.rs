//! Multi-step form controller
//!
//! A [`MultiStepForm`] owns the state of one form: the visible step, the live
//! value and validity of every field, and the submission lifecycle. The
//! document and animator come from the [`Page`] passed to every call.
//!
//! Step changes are two-phase. [`MultiStepForm::go_to_step`] starts the exit
//! animation of the visible step; the host forwards finished animations to
//! [`MultiStepForm::on_animations_complete`], which swaps the active step,
//! re-renders progress and starts the entrance animation in one batch.

use super::field::{FieldBinding, FieldKind, FieldState, Validity};
use super::progress::ACTIVE;
use super::scan::{self, Control, FormLayout};
use super::step::SpecialRule;
use super::submission::{FormPayload, Submission, SubmissionSink, SubmitOutcome};
use super::validation::{validate_field, FieldError, FieldInput};
use crate::animation::{AnimationId, TweenSpec};
use crate::config::FormConfig;
use crate::dom::{Document, ElementId, StyleProp};
use crate::error::{FormError, Result};
use crate::page::Page;
use std::collections::BTreeMap;
use uuid::Uuid;

pub const VALID: &str = "is-valid";
pub const INVALID: &str = "is-invalid";
pub const FOCUSED: &str = "is-focused";
pub const HAS_VALUE: &str = "has-value";
pub const LOADING: &str = "is-loading";
pub const VISIBLE: &str = "is-visible";

/// Result of a navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Exit animation running; `to` becomes current once it completes
    Started { from: usize, to: usize },
    /// The current step failed validation
    Blocked,
    /// Nothing to do (same step, boundary, busy or mid-transition)
    Unchanged,
}

/// User interaction delivered by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    Click(ElementId),
    Input { field: ElementId, value: String },
    Toggle { field: ElementId, checked: bool },
    Focus(ElementId),
    Blur(ElementId),
    /// Implicit submission (Enter in a text field)
    Submit,
}

/// What the controller did with an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    Ignored,
    Handled,
    Navigated(Navigation),
    /// The host should run a submission, see [`MultiStepForm::submit`]
    SubmitRequested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingTransition {
    from: usize,
    to: usize,
    exit: AnimationId,
}

#[derive(Debug)]
pub struct MultiStepForm {
    id: Uuid,
    config: FormConfig,
    layout: FormLayout,
    fields: BTreeMap<ElementId, FieldState>,
    current: usize,
    pending: Option<PendingTransition>,
    busy: bool,
    delivered: bool,
    submission_error: Option<String>,
}

impl MultiStepForm {
    /// Bind a controller to `form`.
    ///
    /// Returns `Ok(None)` when the form has no step containers. Step 1 is
    /// made active and the progress indicator rendered for it.
    pub fn attach(page: &mut Page, form: ElementId, config: FormConfig) -> Result<Option<Self>> {
        config.validate()?;
        if !page.document().contains(form) {
            return Err(FormError::UnknownElement(form));
        }
        let Some(layout) = scan::scan(page.document(), form, &config.honeypot_field)? else {
            tracing::debug!("Form {form} has no steps, not attaching");
            return Ok(None);
        };

        let fields = layout
            .fields
            .iter()
            .map(|b| (b.element, b.initial_state(page.document())))
            .collect();
        let controller = Self {
            id: Uuid::new_v4(),
            config,
            layout,
            fields,
            current: 1,
            pending: None,
            busy: false,
            delivered: false,
            submission_error: None,
        };
        controller.render_initial(page.document_mut());

        tracing::info!(
            "Attached form {} to {form} ({} steps, {} fields)",
            controller.id,
            controller.step_count(),
            controller.layout.fields.len()
        );
        Ok(Some(controller))
    }

    /// Attach a controller to every `[data-multi-step]` form on the page
    pub fn attach_all(page: &mut Page, config: &FormConfig) -> Result<Vec<Self>> {
        let forms = scan::find_forms(page.document());
        let mut attached = Vec::with_capacity(forms.len());
        for form in forms {
            if let Some(controller) = Self::attach(page, form, config.clone())? {
                attached.push(controller);
            }
        }
        Ok(attached)
    }

    fn render_initial(&self, doc: &mut Document) {
        doc.batch(|doc| {
            for step in &self.layout.steps {
                doc.toggle_class(step.container, ACTIVE, step.index == 1);
            }
            self.layout.progress.render(doc, 1);
            for binding in self.layout.fields.iter().filter(|b| b.floating) {
                if let (Some(group), Some(state)) = (binding.group, self.fields.get(&binding.element)) {
                    doc.toggle_class(group, HAS_VALUE, !state.value.is_empty());
                }
            }
        });
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn layout(&self) -> &FormLayout {
        &self.layout
    }

    /// 1-based index of the visible step
    pub fn current_step(&self) -> usize {
        self.current
    }

    pub fn step_count(&self) -> usize {
        self.layout.steps.len()
    }

    pub fn is_transitioning(&self) -> bool {
        self.pending.is_some()
    }

    /// A submission is in flight
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// The success view is showing
    pub fn is_delivered(&self) -> bool {
        self.delivered
    }

    pub fn submission_error(&self) -> Option<&str> {
        self.submission_error.as_deref()
    }

    pub fn field_state(&self, field: ElementId) -> Option<&FieldState> {
        self.fields.get(&field)
    }

    /// First field carrying `name`
    pub fn field_named(&self, name: &str) -> Option<ElementId> {
        self.layout
            .fields
            .iter()
            .find(|b| b.name.as_deref() == Some(name))
            .map(|b| b.element)
    }

    fn navigable(&self) -> bool {
        !self.busy && !self.delivered && self.pending.is_none()
    }

    // --- navigation ---

    /// Validate the current step and move to the next one
    pub fn advance(&mut self, page: &mut Page) -> Navigation {
        if !self.navigable() {
            return Navigation::Unchanged;
        }
        if !self.validate_step(page, self.current) {
            tracing::debug!("Form {}: step {} failed validation", self.id, self.current);
            self.shake_current(page);
            return Navigation::Blocked;
        }
        if self.current >= self.step_count() {
            return Navigation::Unchanged;
        }
        self.transition_to(page, self.current + 1)
            .unwrap_or(Navigation::Unchanged)
    }

    /// Move to the previous step without validating
    pub fn retreat(&mut self, page: &mut Page) -> Navigation {
        if !self.navigable() || self.current <= 1 {
            return Navigation::Unchanged;
        }
        self.transition_to(page, self.current - 1)
            .unwrap_or(Navigation::Unchanged)
    }

    /// Start the transition to `target`.
    ///
    /// Moving forward validates every step from the current one up to
    /// `target` and returns `Blocked` at the first failure. Requests for the
    /// current step, and any request while a transition is in flight, are
    /// no-ops.
    pub fn go_to_step(&mut self, page: &mut Page, target: usize) -> Result<Navigation> {
        self.check_target(target)?;
        if !self.accepts_target(target) {
            return Ok(Navigation::Unchanged);
        }
        for index in self.current..target {
            if !self.validate_step(page, index) {
                tracing::debug!("Form {}: step {index} blocks the move to {target}", self.id);
                if index == self.current {
                    self.shake_current(page);
                }
                return Ok(Navigation::Blocked);
            }
        }
        self.transition_to(page, target)
    }

    fn check_target(&self, target: usize) -> Result<()> {
        let total = self.step_count();
        if target == 0 || target > total {
            return Err(FormError::StepOutOfRange {
                step: target,
                total,
            });
        }
        Ok(())
    }

    fn accepts_target(&self, target: usize) -> bool {
        if let Some(pending) = self.pending {
            tracing::debug!(
                "Form {}: ignoring step {target}, already moving to {}",
                self.id,
                pending.to
            );
            return false;
        }
        !self.busy && !self.delivered && target != self.current
    }

    /// Start the exit tween towards `target` without validating
    fn transition_to(&mut self, page: &mut Page, target: usize) -> Result<Navigation> {
        self.check_target(target)?;
        if !self.accepts_target(target) {
            return Ok(Navigation::Unchanged);
        }
        let Some(step) = self.layout.step(self.current) else {
            return Ok(Navigation::Unchanged);
        };

        let from = self.current;
        let transition = &self.config.transition;
        let offset = if target > from {
            -transition.offset_px
        } else {
            transition.offset_px
        };
        let exit = page.animate(
            TweenSpec::new(step.container, transition.exit())
                .to(StyleProp::Opacity, 0.0)
                .to(StyleProp::X, offset)
                .easing(transition.easing),
        );
        self.pending = Some(PendingTransition {
            from,
            to: target,
            exit,
        });
        tracing::debug!("Form {}: step {from} -> {target}", self.id);
        Ok(Navigation::Started { from, to: target })
    }

    /// Forward animations reported finished by [`Page::tick`]
    pub fn on_animations_complete(&mut self, page: &mut Page, finished: &[AnimationId]) {
        let Some(pending) = self.pending else {
            return;
        };
        if finished.contains(&pending.exit) {
            self.pending = None;
            self.enter_step(page, pending);
        }
    }

    fn enter_step(&mut self, page: &mut Page, transition: PendingTransition) {
        let (Some(from), Some(to)) = (
            self.layout.step(transition.from),
            self.layout.step(transition.to),
        ) else {
            return;
        };
        let (old, new, first_input) = (from.container, to.container, to.first_input);
        let progress = &self.layout.progress;
        let config = &self.config.transition;
        let offset = if transition.to > transition.from {
            config.offset_px
        } else {
            -config.offset_px
        };
        let entrance = TweenSpec::new(new, config.enter())
            .from_to(StyleProp::Opacity, 0.0, 1.0)
            .from_to(StyleProp::X, offset, 0.0)
            .easing(config.easing);

        page.batch(|page| {
            let doc = page.document_mut();
            doc.remove_class(old, ACTIVE);
            doc.add_class(new, ACTIVE);
            progress.render(doc, transition.to);
            if first_input.is_some() {
                doc.focus(first_input);
            }
            page.animate(entrance);
        });
        self.current = transition.to;
    }

    fn shake_current(&self, page: &mut Page) {
        let Some(step) = self.layout.step(self.current) else {
            return;
        };
        let shake = &self.config.shake;
        page.animate(
            TweenSpec::new(step.container, shake.duration())
                .keyframes(StyleProp::X, shake.keyframes())
                .easing(shake.easing),
        );
    }

    // --- validation ---

    /// Validate every required field and the special rule of step `index`,
    /// rendering each result. Unknown steps are valid.
    pub fn validate_step(&mut self, page: &mut Page, index: usize) -> bool {
        let Some(step) = self.layout.step(index) else {
            return true;
        };
        let required = step.required_fields.clone();
        let rule = step.special_rule.clone();

        let mut valid = true;
        page.batch(|page| {
            for field in required {
                valid &= self.check_field(page, field);
            }
            if let Some(rule) = &rule {
                valid &= self.check_rule(page, rule);
            }
        });
        valid
    }

    /// Validate a single field and render the result
    pub fn validate_field(&mut self, page: &mut Page, field: ElementId) -> Result<bool> {
        if self.layout.binding(field).is_none() {
            return Err(FormError::UnknownField(field));
        }
        Ok(self.check_field(page, field))
    }

    fn check_field(&mut self, page: &mut Page, field: ElementId) -> bool {
        let Some(binding) = self.layout.binding(field) else {
            return true;
        };
        let state = self.fields.entry(field).or_default();
        let result = validate_field(&FieldInput {
            value: &state.value,
            kind: &binding.kind,
            required: binding.required,
            min_length: binding.min_length,
            checked: state.checked,
        });
        let filled = if binding.kind.is_toggle() {
            state.checked
        } else {
            !state.value.trim().is_empty()
        };
        state.validity = match &result {
            Ok(()) => Validity::Valid,
            Err(err) => Validity::Invalid(err.clone()),
        };
        render_field(page, &self.config, binding, &result, filled);
        result.is_ok()
    }

    fn check_rule(&self, page: &mut Page, rule: &SpecialRule) -> bool {
        let result = rule.evaluate(page.document());
        render_rule(page, &self.config, rule, &result);
        result.is_ok()
    }

    // --- field interaction ---

    /// New text for `field`; revalidates once the field was blurred or is invalid
    pub fn input(&mut self, page: &mut Page, field: ElementId, value: &str) -> Result<()> {
        let binding = self.layout.binding(field).ok_or(FormError::UnknownField(field))?;
        let floating_group = binding.group.filter(|_| binding.floating);
        let is_radio = binding.kind == FieldKind::Radio;

        let state = self.fields.entry(field).or_default();
        state.value = value.to_string();
        let revalidate = state.revalidates_on_input() && !is_radio;

        page.batch(|page| {
            let doc = page.document_mut();
            doc.set_value(field, value);
            if let Some(group) = floating_group {
                doc.toggle_class(group, HAS_VALUE, !value.is_empty());
            }
            if revalidate {
                self.check_field(page, field);
            }
        });
        Ok(())
    }

    /// Check or uncheck a toggle. Checking a radio unchecks its namesakes.
    pub fn set_checked(&mut self, page: &mut Page, field: ElementId, checked: bool) -> Result<()> {
        let binding = self.layout.binding(field).ok_or(FormError::UnknownField(field))?;
        let is_radio = binding.kind == FieldKind::Radio;
        let namesakes: Vec<ElementId> = if is_radio && checked && binding.name.is_some() {
            self.layout
                .fields
                .iter()
                .filter(|b| b.element != field && b.kind == FieldKind::Radio && b.name == binding.name)
                .map(|b| b.element)
                .collect()
        } else {
            Vec::new()
        };

        let fields = &mut self.fields;
        page.batch(|page| {
            let doc = page.document_mut();
            for other in &namesakes {
                doc.set_checked(*other, false);
                fields.entry(*other).or_default().checked = false;
            }
            doc.set_checked(field, checked);
        });

        let state = self.fields.entry(field).or_default();
        state.checked = checked;
        let revalidate = state.revalidates_on_input();

        if is_radio {
            let rule = self
                .layout
                .step_of(field)
                .and_then(|step| step.special_rule.clone())
                .filter(|rule| rule.involves(field));
            if let Some(rule) = rule {
                let showing = rule
                    .error_element()
                    .is_some_and(|slot| !page.document().element(slot).text().is_empty());
                if showing {
                    self.check_rule(page, &rule);
                }
            }
        } else if revalidate {
            self.check_field(page, field);
        }
        Ok(())
    }

    pub fn focus(&mut self, page: &mut Page, field: ElementId) -> Result<()> {
        let binding = self.layout.binding(field).ok_or(FormError::UnknownField(field))?;
        let floating_group = binding.group.filter(|_| binding.floating);
        page.batch(|page| {
            let doc = page.document_mut();
            doc.focus(Some(field));
            if let Some(group) = floating_group {
                doc.add_class(group, FOCUSED);
            }
        });
        Ok(())
    }

    /// Focus left `field`: mark it touched and validate it when required
    pub fn blur(&mut self, page: &mut Page, field: ElementId) -> Result<()> {
        let binding = self.layout.binding(field).ok_or(FormError::UnknownField(field))?;
        let floating_group = binding.group.filter(|_| binding.floating);
        let validate = binding.required && binding.kind != FieldKind::Radio;

        let state = self.fields.entry(field).or_default();
        state.touched = true;
        let has_value = !state.value.is_empty();

        page.batch(|page| {
            let doc = page.document_mut();
            if doc.focused() == Some(field) {
                doc.focus(None);
            }
            if let Some(group) = floating_group {
                doc.remove_class(group, FOCUSED);
                doc.toggle_class(group, HAS_VALUE, has_value);
            }
            if validate {
                self.check_field(page, field);
            }
        });
        Ok(())
    }

    /// Route a user interaction to the matching operation
    pub fn handle_event(&mut self, page: &mut Page, event: FormEvent) -> Reaction {
        let handled = |result: Result<()>| match result {
            Ok(()) => Reaction::Handled,
            Err(err) => {
                tracing::debug!("Event ignored: {err}");
                Reaction::Ignored
            }
        };

        match event {
            FormEvent::Click(element) => {
                let Some(control) = self.layout.control(element) else {
                    return Reaction::Ignored;
                };
                if page.document().element(element).is_disabled() {
                    return Reaction::Ignored;
                }
                match control {
                    Control::Next => Reaction::Navigated(self.advance(page)),
                    Control::Prev => Reaction::Navigated(self.retreat(page)),
                    Control::Reset => {
                        if self.reset(page) {
                            Reaction::Handled
                        } else {
                            Reaction::Ignored
                        }
                    }
                    Control::Submit => self.submit_requested(),
                }
            }
            FormEvent::Input { field, value } => handled(self.input(page, field, &value)),
            FormEvent::Toggle { field, checked } => {
                handled(self.set_checked(page, field, checked))
            }
            FormEvent::Focus(field) => handled(self.focus(page, field)),
            FormEvent::Blur(field) => handled(self.blur(page, field)),
            FormEvent::Submit => self.submit_requested(),
        }
    }

    fn submit_requested(&self) -> Reaction {
        if self.busy || self.delivered {
            Reaction::Ignored
        } else {
            Reaction::SubmitRequested
        }
    }

    // --- submission ---

    /// Validate the whole form and collect its payload.
    ///
    /// From an earlier step this advances instead. On `Ready` the form is
    /// busy until [`MultiStepForm::finish_submission`] is called.
    pub fn prepare_submission(&mut self, page: &mut Page) -> Submission {
        if !self.navigable() {
            tracing::debug!("Form {}: submission ignored", self.id);
            return Submission::Settled(SubmitOutcome::Ignored);
        }

        let last = self.step_count();
        if self.current < last {
            return Submission::Settled(match self.advance(page) {
                Navigation::Blocked => SubmitOutcome::Invalid {
                    step: self.current,
                },
                _ => SubmitOutcome::Deferred,
            });
        }

        if !self.validate_step(page, last) {
            self.shake_current(page);
            return Submission::Settled(SubmitOutcome::Invalid { step: last });
        }
        if let Some(step) = (1..last).find(|index| !self.validate_step(page, *index)) {
            tracing::debug!("Form {}: step {step} is invalid, returning to it", self.id);
            if let Err(err) = self.transition_to(page, step) {
                tracing::warn!("Form {}: {err}", self.id);
            }
            return Submission::Settled(SubmitOutcome::Invalid { step });
        }

        if self.honeypot_filled(page.document()) {
            tracing::warn!("Form {}: honeypot filled, submission discarded", self.id);
            return Submission::Settled(SubmitOutcome::Discarded);
        }

        let payload = self.collect_payload(page.document());
        self.clear_submission_error(page);
        self.set_busy(page, true);
        tracing::info!("Form {}: submitting {} values", self.id, payload.len());
        Submission::Ready(payload)
    }

    /// Settle a submission started by [`MultiStepForm::prepare_submission`]
    pub fn finish_submission(&mut self, page: &mut Page, result: anyhow::Result<()>) -> SubmitOutcome {
        if !self.busy {
            tracing::warn!("Form {}: no submission in flight", self.id);
            return SubmitOutcome::Ignored;
        }
        self.set_busy(page, false);
        match result {
            Ok(()) => {
                self.show_success(page);
                tracing::info!("Form {} delivered", self.id);
                SubmitOutcome::Delivered
            }
            Err(err) => {
                tracing::warn!("Form {} submission failed: {err:#}", self.id);
                self.show_submission_error(page);
                SubmitOutcome::Rejected
            }
        }
    }

    /// Prepare, hand the payload to `sink` and settle
    pub async fn submit<S>(&mut self, page: &mut Page, sink: &S) -> SubmitOutcome
    where
        S: SubmissionSink + ?Sized,
    {
        match self.prepare_submission(page) {
            Submission::Settled(outcome) => outcome,
            Submission::Ready(payload) => {
                let result = sink.submit(payload).await;
                self.finish_submission(page, result)
            }
        }
    }

    fn honeypot_filled(&self, doc: &Document) -> bool {
        self.layout.honeypot.is_some_and(|honeypot| {
            !doc.element(honeypot).value().is_empty()
                || self
                    .fields
                    .get(&honeypot)
                    .is_some_and(|state| !state.value.is_empty())
        })
    }

    /// Named, enabled fields in document order; unchecked toggles are skipped
    fn collect_payload(&self, doc: &Document) -> FormPayload {
        let mut payload = FormPayload::new();
        for binding in &self.layout.fields {
            if Some(binding.element) == self.layout.honeypot || doc.element(binding.element).is_disabled() {
                continue;
            }
            let Some(name) = binding.name.as_deref().filter(|n| !n.is_empty()) else {
                continue;
            };
            let Some(state) = self.fields.get(&binding.element) else {
                continue;
            };
            if let Some(value) = binding.submit_value(state) {
                payload.insert(name, value);
            }
        }
        payload
    }

    fn set_busy(&mut self, page: &mut Page, busy: bool) {
        self.busy = busy;
        let controls = &self.layout.controls;
        page.document_mut().batch(|doc| {
            for (control, role) in controls {
                doc.set_disabled(*control, busy);
                if *role == Control::Submit {
                    doc.toggle_class(*control, LOADING, busy);
                }
            }
        });
    }

    fn show_success(&mut self, page: &mut Page) {
        let layout = &self.layout;
        let feedback = &self.config.feedback;
        page.batch(|page| {
            let doc = page.document_mut();
            for step in &layout.steps {
                doc.remove_class(step.container, ACTIVE);
                doc.set_hidden(step.container, true);
            }
            if let Some(progress) = layout.progress.container {
                doc.set_hidden(progress, true);
            }
            doc.focus(None);
            if let Some(success) = layout.success {
                doc.set_hidden(success, false);
                page.animate(
                    TweenSpec::new(success, feedback.success_enter())
                        .from_to(StyleProp::Opacity, 0.0, 1.0)
                        .from_to(StyleProp::Y, feedback.success_offset_px, 0.0),
                );
            }
        });
        self.delivered = true;
    }

    fn show_submission_error(&mut self, page: &mut Page) {
        let message = self.config.messages.submission_failed.clone();
        if let Some(slot) = self.layout.global_error {
            let config = &self.config;
            page.batch(|page| {
                let doc = page.document_mut();
                doc.set_hidden(slot, false);
                doc.add_class(slot, VISIBLE);
                show_error(page, config, slot, &message);
            });
        }
        self.submission_error = Some(message);
    }

    fn clear_submission_error(&mut self, page: &mut Page) {
        self.submission_error = None;
        if let Some(slot) = self.layout.global_error {
            page.document_mut().batch(|doc| {
                doc.set_text(slot, "");
                doc.remove_class(slot, VISIBLE);
                doc.set_hidden(slot, true);
            });
        }
    }

    // --- reset ---

    /// Restore the form to its attach-time state.
    ///
    /// Cancels any step transition, restores default values, clears every
    /// validation mark and shows step 1. Returns `false` while a submission
    /// is in flight. Resetting twice is the same as resetting once.
    pub fn reset(&mut self, page: &mut Page) -> bool {
        if self.busy {
            tracing::debug!("Form {}: reset ignored while submitting", self.id);
            return false;
        }

        let layout = &self.layout;
        let views = [layout.success, layout.global_error, layout.progress.container];
        for element in layout.steps.iter().map(|s| s.container).chain(views.into_iter().flatten()) {
            page.kill_tweens_of(element);
        }
        self.pending = None;
        let progress_was_hidden = layout
            .progress
            .container
            .is_some_and(|c| page.document().element(c).is_hidden());

        page.document_mut().batch(|doc| {
            for binding in &layout.fields {
                doc.set_value(binding.element, &binding.default_value);
                doc.set_checked(binding.element, binding.default_checked);
                doc.remove_class(binding.element, VALID);
                doc.remove_class(binding.element, INVALID);
                if let Some(slot) = binding.error {
                    doc.set_text(slot, "");
                }
                if let Some(group) = binding.group.filter(|_| binding.floating) {
                    doc.remove_class(group, FOCUSED);
                    doc.toggle_class(group, HAS_VALUE, !binding.default_value.is_empty());
                }
            }
            for step in &layout.steps {
                if let Some(SpecialRule::ExclusiveChoice(group)) = &step.special_rule {
                    doc.remove_class(group.container, INVALID);
                    if let Some(slot) = group.error {
                        doc.set_text(slot, "");
                    }
                }
                doc.set_hidden(step.container, false);
                doc.toggle_class(step.container, ACTIVE, step.index == 1);
                doc.set_style(step.container, StyleProp::Opacity, 1.0);
                doc.set_style(step.container, StyleProp::X, 0.0);
            }
            if let Some(success) = layout.success {
                doc.set_hidden(success, true);
            }
            if let Some(slot) = layout.global_error {
                doc.set_text(slot, "");
                doc.remove_class(slot, VISIBLE);
                doc.set_hidden(slot, true);
            }
            if let Some(container) = layout.progress.container {
                doc.set_hidden(container, false);
            }
            layout.progress.render(doc, 1);
            doc.focus(None);
        });

        if progress_was_hidden {
            if let Some(container) = layout.progress.container {
                page.animate(
                    TweenSpec::new(container, self.config.feedback.progress_fade())
                        .from_to(StyleProp::Opacity, 0.0, 1.0),
                );
            }
        }

        self.fields = layout
            .fields
            .iter()
            .map(|b| (b.element, b.default_state()))
            .collect();
        self.current = 1;
        self.delivered = false;
        self.submission_error = None;
        tracing::info!("Form {} reset", self.id);
        true
    }
}

fn show_error(page: &mut Page, config: &FormConfig, slot: ElementId, text: &str) {
    let feedback = &config.feedback;
    page.document_mut().set_text(slot, text);
    page.animate(
        TweenSpec::new(slot, feedback.error_fade())
            .from_to(StyleProp::Opacity, 0.0, 1.0)
            .from_to(StyleProp::Y, -feedback.error_offset_px, 0.0),
    );
}

fn render_field(
    page: &mut Page,
    config: &FormConfig,
    binding: &FieldBinding,
    result: &std::result::Result<(), FieldError>,
    filled: bool,
) {
    let field = binding.element;
    page.batch(|page| {
        let doc = page.document_mut();
        match result {
            Err(err) => {
                doc.remove_class(field, VALID);
                doc.add_class(field, INVALID);
                if let Some(slot) = binding.error {
                    show_error(page, config, slot, &err.message(&config.messages));
                }
            }
            Ok(()) => {
                doc.remove_class(field, INVALID);
                doc.toggle_class(field, VALID, filled);
                if let Some(slot) = binding.error {
                    doc.set_text(slot, "");
                }
            }
        }
    });
}

fn render_rule(
    page: &mut Page,
    config: &FormConfig,
    rule: &SpecialRule,
    result: &std::result::Result<(), FieldError>,
) {
    match rule {
        SpecialRule::ExclusiveChoice(group) => page.batch(|page| {
            page.document_mut()
                .toggle_class(group.container, INVALID, result.is_err());
            if let Some(slot) = group.error {
                match result {
                    Err(err) => show_error(page, config, slot, &err.message(&config.messages)),
                    Ok(()) => page.document_mut().set_text(slot, ""),
                }
            }
        }),
    }
}
