//! One-time binding of a form's structure
//!
//! The document is scanned once when a form is attached; the controller keeps
//! the resulting [`FormLayout`] and never queries the document again.

use super::field::{FieldBinding, FieldKind};
use super::progress::ProgressIndicator;
use super::step::{ChoiceGroup, SpecialRule, StepDescriptor};
use crate::dom::{Document, ElementId, Selector};
use crate::error::{FormError, Result};

pub const MULTI_STEP_ATTR: &str = "data-multi-step";
pub const STEP_CLASS: &str = "form-step";
pub const STEP_ATTR: &str = "data-step";
pub const NEXT_ATTR: &str = "data-next-step";
pub const PREV_ATTR: &str = "data-prev-step";
pub const RESET_ATTR: &str = "data-reset-form";
pub const GROUP_CLASS: &str = "form-group";
pub const FLOATING_CLASS: &str = "form-group--floating";
pub const ERROR_CLASS: &str = "form-error";
pub const GLOBAL_ERROR_CLASS: &str = "form-error-global";
pub const RADIO_GROUP_CLASS: &str = "form-radio-group";
pub const SUCCESS_CLASS: &str = "form-success";
pub const CARD_CLASS: &str = "form-card";
pub const PROGRESS_CLASS: &str = "form-progress";
pub const PROGRESS_STEP_CLASS: &str = "form-progress__step";
pub const PROGRESS_LINE_CLASS: &str = "form-progress__line";

/// Role of a bound navigation control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Next,
    Prev,
    Reset,
    Submit,
}

/// Element references captured when a form is attached
#[derive(Debug, Clone, PartialEq)]
pub struct FormLayout {
    pub form: ElementId,
    pub steps: Vec<StepDescriptor>,
    pub fields: Vec<FieldBinding>,
    pub controls: Vec<(ElementId, Control)>,
    pub honeypot: Option<ElementId>,
    pub success: Option<ElementId>,
    pub global_error: Option<ElementId>,
    pub progress: ProgressIndicator,
}

impl FormLayout {
    pub fn step(&self, index: usize) -> Option<&StepDescriptor> {
        index.checked_sub(1).and_then(|i| self.steps.get(i))
    }

    pub fn binding(&self, field: ElementId) -> Option<&FieldBinding> {
        self.fields.iter().find(|b| b.element == field)
    }

    pub fn control(&self, element: ElementId) -> Option<Control> {
        self.controls
            .iter()
            .find(|(el, _)| *el == element)
            .map(|(_, control)| *control)
    }

    pub fn controls_of(&self, role: Control) -> impl Iterator<Item = ElementId> + '_ {
        self.controls
            .iter()
            .filter(move |(_, c)| *c == role)
            .map(|(el, _)| *el)
    }

    /// The step containing `field`, if any
    pub fn step_of(&self, field: ElementId) -> Option<&StepDescriptor> {
        self.binding(field)
            .and_then(|b| b.step)
            .and_then(|index| self.step(index))
    }
}

/// Every `[data-multi-step]` form in the document
pub fn find_forms(doc: &Document) -> Vec<ElementId> {
    doc.query_all(doc.root(), &Selector::attr(MULTI_STEP_ATTR))
}

/// Scan `form`; `Ok(None)` when it has no step containers
pub fn scan(doc: &Document, form: ElementId, honeypot_name: &str) -> Result<Option<FormLayout>> {
    let containers = doc.query_all(form, &Selector::class(STEP_CLASS));
    if containers.is_empty() {
        return Ok(None);
    }

    for (i, container) in containers.iter().enumerate() {
        let position = i + 1;
        let found = doc.element(*container).attr(STEP_ATTR);
        if found.and_then(|v| v.trim().parse::<usize>().ok()) != Some(position) {
            return Err(FormError::StepNumbering {
                position,
                found: found.map(str::to_string),
            });
        }
    }

    let step_of = |el: ElementId| {
        containers
            .iter()
            .position(|c| doc.is_inclusive_ancestor(*c, el))
            .map(|i| i + 1)
    };

    let fields: Vec<FieldBinding> = doc
        .query_all(form, &Selector::Field)
        .into_iter()
        .map(|el| bind_field(doc, form, el, step_of(el)))
        .filter(|b| !b.kind.is_button())
        .collect();

    let steps = containers
        .iter()
        .enumerate()
        .map(|(i, container)| describe_step(doc, i + 1, *container, &fields))
        .collect();

    let controls = [
        (Selector::attr(NEXT_ATTR), Control::Next),
        (Selector::attr(PREV_ATTR), Control::Prev),
        (Selector::attr(RESET_ATTR), Control::Reset),
        (Selector::attr_eq("type", "submit"), Control::Submit),
    ]
    .into_iter()
    .flat_map(|(selector, role)| {
        doc.query_all(form, &selector)
            .into_iter()
            .map(move |el| (el, role))
    })
    .collect();

    let honeypot = (!honeypot_name.is_empty())
        .then(|| {
            fields
                .iter()
                .find(|b| b.name.as_deref() == Some(honeypot_name))
                .map(|b| b.element)
        })
        .flatten();

    let card = doc
        .closest(form, &Selector::class(CARD_CLASS))
        .unwrap_or(form);
    let progress = ProgressIndicator {
        container: doc.query(card, &Selector::class(PROGRESS_CLASS)),
        markers: doc.query_all(card, &Selector::class(PROGRESS_STEP_CLASS)),
        segments: doc.query_all(card, &Selector::class(PROGRESS_LINE_CLASS)),
    };

    Ok(Some(FormLayout {
        form,
        steps,
        fields,
        controls,
        honeypot,
        success: doc.query(form, &Selector::class(SUCCESS_CLASS)),
        global_error: doc.query(form, &Selector::class(GLOBAL_ERROR_CLASS)),
        progress,
    }))
}

fn bind_field(doc: &Document, form: ElementId, el: ElementId, step: Option<usize>) -> FieldBinding {
    let element = doc.element(el);
    let kind = FieldKind::from_element(element.tag(), element.attr("type"));
    let group = doc
        .closest(el, &Selector::class(GROUP_CLASS))
        .filter(|g| doc.is_inclusive_ancestor(form, *g));
    let error = group.and_then(|g| doc.query(g, &Selector::class(ERROR_CLASS)));
    let default_value = match element.attr("value") {
        Some(value) => value.to_string(),
        None if kind.is_toggle() => "on".to_string(),
        None => String::new(),
    };

    FieldBinding {
        element: el,
        name: element.attr("name").map(str::to_string),
        required: element.has_attr("required"),
        min_length: element
            .attr("minlength")
            .and_then(|v| v.trim().parse().ok()),
        floating: group.is_some_and(|g| doc.element(g).has_class(FLOATING_CLASS)),
        group,
        error,
        step,
        default_value,
        default_checked: element.has_attr("checked"),
        kind,
    }
}

fn describe_step(
    doc: &Document,
    index: usize,
    container: ElementId,
    fields: &[FieldBinding],
) -> StepDescriptor {
    let own: Vec<&FieldBinding> = fields.iter().filter(|b| b.step == Some(index)).collect();

    let special_rule = doc
        .query(container, &Selector::class(RADIO_GROUP_CLASS))
        .map(|group| {
            let options = own
                .iter()
                .filter(|b| b.kind == FieldKind::Radio && doc.is_inclusive_ancestor(group, b.element))
                .map(|b| b.element)
                .collect();
            let error = doc
                .query(group, &Selector::class(ERROR_CLASS))
                .or_else(|| {
                    doc.closest(group, &Selector::class(GROUP_CLASS))
                        .filter(|g| doc.is_inclusive_ancestor(container, *g))
                        .and_then(|g| doc.query(g, &Selector::class(ERROR_CLASS)))
                })
                .or_else(|| doc.query(container, &Selector::class(ERROR_CLASS)));
            SpecialRule::ExclusiveChoice(ChoiceGroup {
                container: group,
                options,
                error,
            })
        });

    StepDescriptor {
        index,
        container,
        fields: own.iter().map(|b| b.element).collect(),
        required_fields: own
            .iter()
            .filter(|b| b.required && b.kind != FieldKind::Radio)
            .map(|b| b.element)
            .collect(),
        first_input: own
            .iter()
            .find(|b| b.kind != FieldKind::Hidden && doc.is_rendered(b.element))
            .map(|b| b.element),
        special_rule,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::el;
    use crate::templates;
    use pretty_assertions::assert_eq;

    fn contact() -> (Document, ElementId) {
        let mut doc = Document::new();
        let form = templates::contact_form(&mut doc);
        (doc, form)
    }

    #[test]
    fn test_finds_multi_step_forms() {
        let (doc, form) = contact();
        assert_eq!(find_forms(&doc), vec![form]);
    }

    #[test]
    fn test_scans_steps_in_order() {
        let (doc, form) = contact();
        let layout = scan(&doc, form, "_gotcha").unwrap().unwrap();
        assert_eq!(layout.steps.len(), 3);
        for (i, step) in layout.steps.iter().enumerate() {
            assert_eq!(step.index, i + 1);
            assert_eq!(doc.element(step.container).attr(STEP_ATTR), Some((i + 1).to_string().as_str()));
        }
        assert!(layout.step(0).is_none());
        assert!(layout.step(4).is_none());
    }

    #[test]
    fn test_binds_required_fields_and_rules() {
        let (doc, form) = contact();
        let layout = scan(&doc, form, "_gotcha").unwrap().unwrap();

        let names = |ids: &[ElementId]| -> Vec<String> {
            ids.iter()
                .filter_map(|id| layout.binding(*id).and_then(|b| b.name.clone()))
                .collect()
        };
        assert_eq!(names(&layout.steps[0].required_fields), vec!["name", "email"]);
        assert!(layout.steps[0].special_rule.is_none());
        assert!(layout.steps[1].required_fields.is_empty());
        assert!(matches!(
            layout.steps[1].special_rule,
            Some(SpecialRule::ExclusiveChoice(ref g)) if g.options.len() == 3 && g.error.is_some()
        ));
        assert_eq!(names(&layout.steps[2].required_fields), vec!["message", "consent"]);
    }

    #[test]
    fn test_binds_field_details() {
        let (doc, form) = contact();
        let layout = scan(&doc, form, "_gotcha").unwrap().unwrap();
        let message = layout
            .fields
            .iter()
            .find(|b| b.name.as_deref() == Some("message"))
            .unwrap();
        assert_eq!(message.kind, FieldKind::Textarea);
        assert_eq!(message.min_length, Some(10));
        assert!(message.error.is_some());
        assert!(message.floating);
        assert_eq!(message.step, Some(3));

        let phone = layout.fields.iter().find(|b| b.kind == FieldKind::Tel).unwrap();
        assert!(!phone.required);
        assert_eq!(layout.steps[0].first_input, Some(layout.steps[0].fields[0]));
    }

    #[test]
    fn test_binds_controls_and_views() {
        let (doc, form) = contact();
        let layout = scan(&doc, form, "_gotcha").unwrap().unwrap();
        assert_eq!(layout.controls_of(Control::Next).count(), 2);
        assert_eq!(layout.controls_of(Control::Prev).count(), 2);
        assert_eq!(layout.controls_of(Control::Submit).count(), 1);
        assert_eq!(layout.controls_of(Control::Reset).count(), 1);
        assert!(layout.honeypot.is_some());
        assert!(layout.success.is_some());
        assert!(layout.global_error.is_some());
        assert!(layout.progress.container.is_some());
        assert_eq!(layout.progress.markers.len(), 3);
        assert_eq!(layout.progress.segments.len(), 2);
    }

    #[test]
    fn test_honeypot_lookup_can_be_disabled() {
        let (doc, form) = contact();
        let layout = scan(&doc, form, "").unwrap().unwrap();
        assert!(layout.honeypot.is_none());
    }

    #[test]
    fn test_no_steps_is_none() {
        let mut doc = Document::new();
        let root = doc.root();
        let form = el("form")
            .child(el("input").attr("name", "q"))
            .build(&mut doc, root);
        assert_eq!(scan(&doc, form, "_gotcha"), Ok(None));
    }

    #[test]
    fn test_gap_in_numbering_is_an_error() {
        let mut doc = Document::new();
        let root = doc.root();
        let form = el("form")
            .child(el("div").class(STEP_CLASS).attr(STEP_ATTR, "1"))
            .child(el("div").class(STEP_CLASS).attr(STEP_ATTR, "3"))
            .build(&mut doc, root);
        assert_eq!(
            scan(&doc, form, "_gotcha"),
            Err(FormError::StepNumbering {
                position: 2,
                found: Some("3".to_string())
            })
        );
    }

    #[test]
    fn test_missing_step_number_is_an_error() {
        let mut doc = Document::new();
        let root = doc.root();
        let form = el("form")
            .child(el("div").class(STEP_CLASS))
            .build(&mut doc, root);
        assert_eq!(
            scan(&doc, form, "_gotcha"),
            Err(FormError::StepNumbering {
                position: 1,
                found: None
            })
        );
    }
}
