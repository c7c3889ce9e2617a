//! Declarative construction of element trees

use super::document::{Document, ElementId};

/// Start building an element with the given tag
pub fn el(tag: &str) -> ElementBuilder {
    ElementBuilder::new(tag)
}

/// Describes an element and its subtree before it is inserted
#[derive(Debug, Clone, Default)]
pub struct ElementBuilder {
    tag: String,
    attributes: Vec<(String, String)>,
    classes: Vec<String>,
    text: Option<String>,
    value: Option<String>,
    checked: bool,
    hidden: bool,
    children: Vec<ElementBuilder>,
}

impl ElementBuilder {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    /// Add one or more space-separated classes
    pub fn class(mut self, class: &str) -> Self {
        self.classes
            .extend(class.split_whitespace().map(str::to_string));
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.push((name.to_string(), value.to_string()));
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    /// Initial value; also recorded as the `value` attribute so a reset can restore it
    pub fn value(mut self, value: &str) -> Self {
        self.value = Some(value.to_string());
        self
    }

    /// Initial checked state; also recorded as the `checked` attribute
    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn child(mut self, child: ElementBuilder) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = ElementBuilder>) -> Self {
        self.children.extend(children);
        self
    }

    /// Insert the subtree under `parent` without recording mutations
    pub fn build(self, doc: &mut Document, parent: ElementId) -> ElementId {
        let id = doc.create_element(&self.tag);
        let is_toggle = {
            let el = doc.element_mut(id);
            for (name, value) in self.attributes {
                el.attributes.insert(name, value);
            }
            el.classes.extend(self.classes);
            if let Some(text) = self.text {
                el.text = text;
            }
            if self.checked {
                el.attributes.insert("checked".to_string(), String::new());
            }
            el.checked = self.checked;
            el.hidden = self.hidden;
            el.tag == "input" && matches!(el.attr("type"), Some("checkbox") | Some("radio"))
        };
        let value = match (self.value, is_toggle) {
            (Some(value), _) => Some(value),
            (None, true) => Some("on".to_string()),
            (None, false) => None,
        };
        if let Some(value) = value {
            let el = doc.element_mut(id);
            el.attributes.insert("value".to_string(), value.clone());
            el.value = value;
        }
        doc.append_child(parent, id);
        for child in self.children {
            child.build(doc, id);
        }
        id
    }
}
