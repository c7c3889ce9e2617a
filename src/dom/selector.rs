//! Minimal selector matching for the structural conventions the form relies on

use super::document::{Document, Element, ElementId};

/// A structural query, the subset of CSS selectors the form scanner needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// `tag`
    Tag(String),
    /// `.class`
    Class(String),
    /// `[name]`
    Attr(String),
    /// `[name="value"]`
    AttrEq(String, String),
    /// Any form control: `input, textarea, select`
    Field,
    /// All of the inner selectors match
    All(Vec<Selector>),
    /// Any of the inner selectors match
    Any(Vec<Selector>),
}

impl Selector {
    pub fn tag(tag: &str) -> Self {
        Selector::Tag(tag.to_ascii_lowercase())
    }

    pub fn class(class: &str) -> Self {
        Selector::Class(class.to_string())
    }

    pub fn attr(name: &str) -> Self {
        Selector::Attr(name.to_string())
    }

    pub fn attr_eq(name: &str, value: &str) -> Self {
        Selector::AttrEq(name.to_string(), value.to_string())
    }

    /// Conjunction with another selector
    pub fn and(self, other: Selector) -> Self {
        match self {
            Selector::All(mut inner) => {
                inner.push(other);
                Selector::All(inner)
            }
            first => Selector::All(vec![first, other]),
        }
    }

    pub fn matches(&self, el: &Element) -> bool {
        match self {
            Selector::Tag(tag) => el.tag() == tag,
            Selector::Class(class) => el.has_class(class),
            Selector::Attr(name) => el.has_attr(name),
            Selector::AttrEq(name, value) => el.attr(name) == Some(value.as_str()),
            Selector::Field => el.is_field(),
            Selector::All(inner) => inner.iter().all(|s| s.matches(el)),
            Selector::Any(inner) => inner.iter().any(|s| s.matches(el)),
        }
    }
}

impl Document {
    /// Descendants of `scope` matching `selector`, in document order
    pub fn query_all(&self, scope: ElementId, selector: &Selector) -> Vec<ElementId> {
        self.descendants(scope)
            .into_iter()
            .filter(|id| selector.matches(self.element(*id)))
            .collect()
    }

    /// First descendant of `scope` matching `selector`
    pub fn query(&self, scope: ElementId, selector: &Selector) -> Option<ElementId> {
        self.descendants(scope)
            .into_iter()
            .find(|id| selector.matches(self.element(*id)))
    }

    /// Nearest inclusive ancestor of `id` matching `selector`
    pub fn closest(&self, id: ElementId, selector: &Selector) -> Option<ElementId> {
        let mut current = Some(id);
        while let Some(el) = current {
            if selector.matches(self.element(el)) {
                return Some(el);
            }
            current = self.element(el).parent();
        }
        None
    }
}
