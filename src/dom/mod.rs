//! Document model consumed by form controllers
//!
//! - `document`: element arena, writes and the batched mutation log
//! - `selector`: structural queries (`query`, `query_all`, `closest`)
//! - `builder`: declarative tree construction

pub mod builder;
mod document;
mod selector;

pub use builder::{el, ElementBuilder};
pub use document::{Document, Element, ElementId, Mutation, MutationBatch, StyleProp};
pub use selector::Selector;
