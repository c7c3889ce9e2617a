//! Form field value objects

use super::validation::FieldError;
use crate::dom::{Document, ElementId};

/// Declared kind of a form control, from its tag and `type` attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Checkbox,
    Radio,
    Textarea,
    Select,
    Hidden,
    /// Any other `type` (`url`, `number`, ...), validated as plain text
    Other(String),
}

impl FieldKind {
    pub fn from_element(tag: &str, type_attr: Option<&str>) -> Self {
        match tag {
            "textarea" => FieldKind::Textarea,
            "select" => FieldKind::Select,
            _ => match type_attr.map(str::to_ascii_lowercase).as_deref() {
                None | Some("") | Some("text") => FieldKind::Text,
                Some("email") => FieldKind::Email,
                Some("tel") => FieldKind::Tel,
                Some("checkbox") => FieldKind::Checkbox,
                Some("radio") => FieldKind::Radio,
                Some("hidden") => FieldKind::Hidden,
                Some(other) => FieldKind::Other(other.to_string()),
            },
        }
    }

    /// Whether the control is on/off rather than free text
    pub fn is_toggle(&self) -> bool {
        matches!(self, FieldKind::Checkbox | FieldKind::Radio)
    }

    /// Whether the control never produces a submit value (buttons)
    pub fn is_button(&self) -> bool {
        matches!(self, FieldKind::Other(t) if matches!(t.as_str(), "submit" | "button" | "reset"))
    }
}

/// Outcome of the last validation of a field
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Validity {
    /// Never validated since attach or reset
    #[default]
    Unchecked,
    Valid,
    Invalid(FieldError),
}

/// Live state of one field within a session
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldState {
    pub value: String,
    pub checked: bool,
    pub validity: Validity,
    /// Blurred at least once since attach or reset
    pub touched: bool,
}

impl FieldState {
    pub fn is_valid(&self) -> bool {
        !matches!(self.validity, Validity::Invalid(_))
    }

    pub fn error(&self) -> Option<&FieldError> {
        match &self.validity {
            Validity::Invalid(err) => Some(err),
            _ => None,
        }
    }

    /// Whether input should re-run validation right away
    pub fn revalidates_on_input(&self) -> bool {
        self.touched || !self.is_valid()
    }
}

/// Everything the controller needs about a field, captured once at attach
#[derive(Debug, Clone, PartialEq)]
pub struct FieldBinding {
    pub element: ElementId,
    pub name: Option<String>,
    pub kind: FieldKind,
    pub required: bool,
    pub min_length: Option<usize>,
    /// Enclosing `.form-group`
    pub group: Option<ElementId>,
    /// `.form-error` inside the group
    pub error: Option<ElementId>,
    /// Group is a floating-label group
    pub floating: bool,
    /// Owning step (1-based), `None` for fields outside every step
    pub step: Option<usize>,
    pub default_value: String,
    pub default_checked: bool,
}

impl FieldBinding {
    /// Initial state as read from the document
    pub fn initial_state(&self, doc: &Document) -> FieldState {
        let el = doc.element(self.element);
        FieldState {
            value: el.value().to_string(),
            checked: el.is_checked(),
            ..FieldState::default()
        }
    }

    pub fn default_state(&self) -> FieldState {
        FieldState {
            value: self.default_value.clone(),
            checked: self.default_checked,
            ..FieldState::default()
        }
    }

    /// Submit value: toggles only contribute when checked, buttons never
    pub fn submit_value<'a>(&self, state: &'a FieldState) -> Option<&'a str> {
        if self.kind.is_button() {
            return None;
        }
        if self.kind.is_toggle() && !state.checked {
            return None;
        }
        Some(state.value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod field_kind {
        use super::*;

        #[test]
        fn test_from_element() {
            assert_eq!(FieldKind::from_element("input", None), FieldKind::Text);
            assert_eq!(FieldKind::from_element("input", Some("EMAIL")), FieldKind::Email);
            assert_eq!(FieldKind::from_element("input", Some("tel")), FieldKind::Tel);
            assert_eq!(FieldKind::from_element("textarea", Some("email")), FieldKind::Textarea);
            assert_eq!(FieldKind::from_element("select", None), FieldKind::Select);
            assert_eq!(
                FieldKind::from_element("input", Some("url")),
                FieldKind::Other("url".to_string())
            );
        }

        #[test]
        fn test_toggles_and_buttons() {
            assert!(FieldKind::Checkbox.is_toggle());
            assert!(FieldKind::Radio.is_toggle());
            assert!(!FieldKind::Text.is_toggle());
            assert!(FieldKind::Other("submit".to_string()).is_button());
            assert!(!FieldKind::Other("url".to_string()).is_button());
        }
    }

    mod field_state {
        use super::*;

        #[test]
        fn test_default_is_unchecked_and_valid() {
            let state = FieldState::default();
            assert_eq!(state.validity, Validity::Unchecked);
            assert!(state.is_valid());
            assert!(state.error().is_none());
            assert!(!state.revalidates_on_input());
        }

        #[test]
        fn test_invalid_revalidates_on_input() {
            let state = FieldState {
                validity: Validity::Invalid(FieldError::Required),
                ..Default::default()
            };
            assert!(!state.is_valid());
            assert_eq!(state.error(), Some(&FieldError::Required));
            assert!(state.revalidates_on_input());
        }

        #[test]
        fn test_touched_revalidates_on_input() {
            let state = FieldState {
                touched: true,
                ..Default::default()
            };
            assert!(state.revalidates_on_input());
        }
    }

    mod binding {
        use super::*;

        fn binding(kind: FieldKind) -> FieldBinding {
            let mut doc = Document::new();
            FieldBinding {
                element: doc.create_element("input"),
                name: Some("f".to_string()),
                kind,
                required: false,
                min_length: None,
                group: None,
                error: None,
                floating: false,
                step: Some(1),
                default_value: "on".to_string(),
                default_checked: false,
            }
        }

        #[test]
        fn test_unchecked_toggle_has_no_submit_value() {
            let b = binding(FieldKind::Checkbox);
            let mut state = b.default_state();
            assert_eq!(b.submit_value(&state), None);
            state.checked = true;
            assert_eq!(b.submit_value(&state), Some("on"));
        }

        #[test]
        fn test_text_always_submits() {
            let b = binding(FieldKind::Text);
            let state = FieldState::default();
            assert_eq!(b.submit_value(&state), Some(""));
        }
    }
}
