//! Multi-step form engine
//!
//! - `scan`: one-time binding of a form's structure into a [`FormLayout`]
//! - `validation`: per-field rules
//! - `step`: step descriptors and step-level rules
//! - `progress`: progress indicator rendering
//! - `submission`: payloads, sinks and outcomes
//! - `controller`: the [`MultiStepForm`] state machine

pub mod controller;
pub mod field;
pub mod progress;
pub mod scan;
pub mod step;
pub mod submission;
pub mod validation;

pub use controller::{FormEvent, MultiStepForm, Navigation, Reaction};
pub use field::{FieldBinding, FieldKind, FieldState, Validity};
pub use progress::{MarkerState, ProgressIndicator};
pub use scan::{find_forms, scan, Control, FormLayout};
pub use step::{ChoiceGroup, SpecialRule, StepDescriptor};
pub use submission::{FormPayload, SimulatedSink, Submission, SubmissionSink, SubmitOutcome};
pub use validation::{validate_field, FieldError, FieldInput};

#[cfg(test)]
pub use submission::MockSubmissionSink;
