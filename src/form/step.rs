//! Step descriptors and step-level rules

use super::validation::FieldError;
use crate::dom::{Document, ElementId};

/// Radio options of which at least one must be selected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceGroup {
    /// The `.form-radio-group` element
    pub container: ElementId,
    pub options: Vec<ElementId>,
    /// Where the selection error is rendered
    pub error: Option<ElementId>,
}

/// Validation that goes beyond individual fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialRule {
    ExclusiveChoice(ChoiceGroup),
}

impl SpecialRule {
    pub fn evaluate(&self, doc: &Document) -> Result<(), FieldError> {
        match self {
            SpecialRule::ExclusiveChoice(group) => {
                if group.options.iter().any(|o| doc.element(*o).is_checked()) {
                    Ok(())
                } else {
                    Err(FieldError::SelectionRequired)
                }
            }
        }
    }

    /// Element receiving the rule's error text
    pub fn error_element(&self) -> Option<ElementId> {
        match self {
            SpecialRule::ExclusiveChoice(group) => group.error,
        }
    }

    pub fn involves(&self, field: ElementId) -> bool {
        match self {
            SpecialRule::ExclusiveChoice(group) => group.options.contains(&field),
        }
    }
}

/// One screen of the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDescriptor {
    /// 1-based position
    pub index: usize,
    pub container: ElementId,
    /// Every field inside the step, in document order
    pub fields: Vec<ElementId>,
    /// Fields whose validity gates leaving the step
    pub required_fields: Vec<ElementId>,
    pub special_rule: Option<SpecialRule>,
    /// Receives focus when the step becomes active
    pub first_input: Option<ElementId>,
}
