//! Stepform - multi-step form controller
//!
//! Drives a form split into numbered steps: per-step validation with inline
//! errors, a progress indicator, animated step transitions and an async
//! submission with a honeypot check. Forms live in an in-memory [`dom`]
//! owned by a [`Page`]; a terminal demo in `main.rs` hosts the bundled
//! contact form.

pub mod animation;
pub mod config;
pub mod dom;
pub mod error;
pub mod form;
pub mod page;
pub mod templates;

pub use config::FormConfig;
pub use error::{ConfigError, FormError, Result};
pub use form::{FormEvent, MultiStepForm, Navigation, Reaction, SubmissionSink, SubmitOutcome};
pub use page::Page;
