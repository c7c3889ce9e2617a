//! Per-field validation rules

use super::field::FieldKind;
use crate::config::Messages;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9\s+()-]{10,}$").expect("valid phone pattern"));

static TEXT: FieldKind = FieldKind::Text;

/// A user-correctable problem with a field or a step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    Required,
    InvalidEmail,
    InvalidPhone,
    MustAccept,
    TooShort { min: usize },
    /// No option of an exclusive-choice group is selected
    SelectionRequired,
}

impl FieldError {
    /// Text rendered next to the field
    pub fn message(&self, messages: &Messages) -> String {
        match self {
            FieldError::Required => messages.required.clone(),
            FieldError::InvalidEmail => messages.invalid_email.clone(),
            FieldError::InvalidPhone => messages.invalid_phone.clone(),
            FieldError::MustAccept => messages.must_accept.clone(),
            FieldError::TooShort { min } => messages.min_length.replace("{min}", &min.to_string()),
            FieldError::SelectionRequired => messages.select_option.clone(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message(&Messages::default()))
    }
}

/// What validation looks at for a single field
#[derive(Debug, Clone, Copy)]
pub struct FieldInput<'a> {
    pub value: &'a str,
    pub kind: &'a FieldKind,
    pub required: bool,
    pub min_length: Option<usize>,
    pub checked: bool,
}

impl<'a> FieldInput<'a> {
    /// Optional, unchecked, text input carrying `value`
    pub fn text(value: &'a str) -> Self {
        Self {
            value,
            kind: &TEXT,
            required: false,
            min_length: None,
            checked: false,
        }
    }

    pub fn kind(mut self, kind: &'a FieldKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn min_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }
}

/// Validate one field.
///
/// Rules run in a fixed order and the first failure is reported:
/// required, email format, phone format, required checkbox, minimum length.
/// The value is trimmed first; format and length rules skip empty values.
pub fn validate_field(input: &FieldInput<'_>) -> Result<(), FieldError> {
    let value = input.value.trim();

    if input.required && value.is_empty() {
        return Err(FieldError::Required);
    }
    if *input.kind == FieldKind::Email && !value.is_empty() && !EMAIL.is_match(value) {
        return Err(FieldError::InvalidEmail);
    }
    if *input.kind == FieldKind::Tel && !value.is_empty() && !PHONE.is_match(value) {
        return Err(FieldError::InvalidPhone);
    }
    if *input.kind == FieldKind::Checkbox && input.required && !input.checked {
        return Err(FieldError::MustAccept);
    }
    if let Some(min) = input.min_length {
        if !value.is_empty() && value.chars().count() < min {
            return Err(FieldError::TooShort { min });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    mod literal_cases {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_empty_required() {
            let err = validate_field(&FieldInput::text("").required(true)).unwrap_err();
            assert_eq!(err, FieldError::Required);
            assert_eq!(err.to_string(), "field required");
        }

        #[test]
        fn test_whitespace_only_counts_as_empty() {
            let err = validate_field(&FieldInput::text("   \t").required(true)).unwrap_err();
            assert_eq!(err, FieldError::Required);
        }

        #[test]
        fn test_bad_email() {
            let err = validate_field(&FieldInput::text("not-an-email").kind(&FieldKind::Email))
                .unwrap_err();
            assert_eq!(err, FieldError::InvalidEmail);
            assert_eq!(err.to_string(), "invalid email");
        }

        #[test]
        fn test_good_email() {
            assert_eq!(
                validate_field(&FieldInput::text("jane@example.com").kind(&FieldKind::Email)),
                Ok(())
            );
        }

        #[test]
        fn test_short_phone() {
            let err = validate_field(&FieldInput::text("12345").kind(&FieldKind::Tel)).unwrap_err();
            assert_eq!(err, FieldError::InvalidPhone);
            assert_eq!(err.to_string(), "invalid phone");
        }

        #[test]
        fn test_formatted_phone() {
            assert_eq!(
                validate_field(&FieldInput::text("+1 (555) 123-4567").kind(&FieldKind::Tel)),
                Ok(())
            );
        }

        #[test]
        fn test_phone_with_letters() {
            assert_eq!(
                validate_field(&FieldInput::text("555-CALL-NOW-1").kind(&FieldKind::Tel)),
                Err(FieldError::InvalidPhone)
            );
        }

        #[test]
        fn test_min_length() {
            let err = validate_field(&FieldInput::text("abcd").min_length(5)).unwrap_err();
            assert_eq!(err, FieldError::TooShort { min: 5 });
            assert_eq!(err.to_string(), "minimum 5 characters");
        }

        #[test]
        fn test_min_length_counts_characters() {
            assert_eq!(validate_field(&FieldInput::text("éèàçù").min_length(5)), Ok(()));
        }

        #[test]
        fn test_unchecked_required_checkbox() {
            let kind = FieldKind::Checkbox;
            let input = FieldInput::text("on").kind(&kind).required(true);
            let err = validate_field(&input).unwrap_err();
            assert_eq!(err.to_string(), "must accept to continue");
            assert_eq!(validate_field(&input.checked(true)), Ok(()));
        }
    }

    mod optional_fields {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_empty_optional_email_is_valid() {
            assert_eq!(validate_field(&FieldInput::text("").kind(&FieldKind::Email)), Ok(()));
        }

        #[test]
        fn test_empty_value_skips_min_length() {
            assert_eq!(validate_field(&FieldInput::text("").min_length(10)), Ok(()));
        }

        #[test]
        fn test_optional_checkbox_may_stay_unchecked() {
            assert_eq!(
                validate_field(&FieldInput::text("on").kind(&FieldKind::Checkbox)),
                Ok(())
            );
        }
    }

    mod rule_order {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_required_wins_over_min_length() {
            let input = FieldInput::text(" ").required(true).min_length(3);
            assert_eq!(validate_field(&input), Err(FieldError::Required));
        }

        #[test]
        fn test_email_wins_over_min_length() {
            let kind = FieldKind::Email;
            let input = FieldInput::text("a@b").kind(&kind).min_length(8);
            assert_eq!(validate_field(&input), Err(FieldError::InvalidEmail));
        }

        #[test]
        fn test_phone_wins_over_min_length() {
            let kind = FieldKind::Tel;
            let input = FieldInput::text("12").kind(&kind).min_length(12);
            assert_eq!(validate_field(&input), Err(FieldError::InvalidPhone));
        }

        #[test]
        fn test_checkbox_wins_over_min_length() {
            let kind = FieldKind::Checkbox;
            let input = FieldInput::text("on")
                .kind(&kind)
                .required(true)
                .min_length(5);
            assert_eq!(validate_field(&input), Err(FieldError::MustAccept));
        }
    }

    mod messages {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_custom_messages() {
            let messages = Messages {
                required: "Ce champ est requis".to_string(),
                min_length: "Minimum {min} caractères requis".to_string(),
                ..Messages::default()
            };
            assert_eq!(FieldError::Required.message(&messages), "Ce champ est requis");
            assert_eq!(
                FieldError::TooShort { min: 10 }.message(&messages),
                "Minimum 10 caractères requis"
            );
        }

        #[test]
        fn test_selection_message() {
            assert_eq!(FieldError::SelectionRequired.to_string(), "please select an option");
        }
    }
}
