//! Error types

use crate::dom::ElementId;
use thiserror::Error;

/// Rejected configuration values
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be a finite, non-negative number (got {value})")]
    InvalidNumber { field: &'static str, value: f32 },

    #[error("shake feedback needs at least one cycle")]
    NoShakeCycles,

    #[error("shake feedback allows at most {max} cycles (got {cycles})")]
    TooManyShakeCycles { cycles: u32, max: u32 },

    #[error("message `{0}` must not be empty")]
    EmptyMessage(&'static str),

    #[error("min-length message must contain the `{{min}}` placeholder")]
    MissingMinPlaceholder,
}

/// Misuse of the controller or a malformed document
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("invalid form configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("step container at position {position} has data-step {found:?}, expected {position}")]
    StepNumbering {
        position: usize,
        found: Option<String>,
    },

    #[error("step {step} is out of range 1..={total}")]
    StepOutOfRange { step: usize, total: usize },

    #[error("element {0} is not a field of this form")]
    UnknownField(ElementId),

    #[error("element {0} does not belong to this document")]
    UnknownElement(ElementId),
}

pub type Result<T> = std::result::Result<T, FormError>;
