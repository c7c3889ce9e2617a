//! In-memory document tree with a batched mutation log

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Handle to an element owned by a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ElementId(usize);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Numeric presentation properties that tweens can interpolate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum StyleProp {
    Opacity,
    /// Horizontal offset in pixels
    X,
    /// Vertical offset in pixels
    Y,
}

impl StyleProp {
    /// Value assumed for an element that never had the property written
    pub fn neutral(self) -> f32 {
        match self {
            StyleProp::Opacity => 1.0,
            StyleProp::X | StyleProp::Y => 0.0,
        }
    }
}

/// A single node of the tree
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub(crate) tag: String,
    pub(crate) parent: Option<ElementId>,
    pub(crate) children: Vec<ElementId>,
    pub(crate) attributes: BTreeMap<String, String>,
    pub(crate) classes: BTreeSet<String>,
    pub(crate) text: String,
    pub(crate) value: String,
    pub(crate) checked: bool,
    pub(crate) disabled: bool,
    pub(crate) hidden: bool,
    pub(crate) style: BTreeMap<StyleProp, f32>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            parent: None,
            children: Vec::new(),
            attributes: BTreeMap::new(),
            classes: BTreeSet::new(),
            text: String::new(),
            value: String::new(),
            checked: false,
            disabled: false,
            hidden: false,
            style: BTreeMap::new(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Current value of a style property, falling back to its neutral value
    pub fn style(&self, prop: StyleProp) -> f32 {
        self.style.get(&prop).copied().unwrap_or_else(|| prop.neutral())
    }

    /// Whether this element is a form control (`input`, `textarea`, `select`)
    pub fn is_field(&self) -> bool {
        matches!(self.tag.as_str(), "input" | "textarea" | "select")
    }
}

/// One observable change to the tree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Mutation {
    ClassAdded { element: ElementId, class: String },
    ClassRemoved { element: ElementId, class: String },
    Attribute { element: ElementId, name: String },
    Text { element: ElementId },
    Value { element: ElementId },
    Checked { element: ElementId, checked: bool },
    Disabled { element: ElementId, disabled: bool },
    Hidden { element: ElementId, hidden: bool },
    Style { element: ElementId, prop: StyleProp, value: f32 },
    Focus { element: Option<ElementId> },
}

impl Mutation {
    pub fn element(&self) -> Option<ElementId> {
        match self {
            Mutation::ClassAdded { element, .. }
            | Mutation::ClassRemoved { element, .. }
            | Mutation::Attribute { element, .. }
            | Mutation::Text { element }
            | Mutation::Value { element }
            | Mutation::Checked { element, .. }
            | Mutation::Disabled { element, .. }
            | Mutation::Hidden { element, .. }
            | Mutation::Style { element, .. } => Some(*element),
            Mutation::Focus { element } => *element,
        }
    }
}

/// Mutations that observers see as a single atomic change
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MutationBatch {
    pub seq: u64,
    pub mutations: Vec<Mutation>,
}

impl MutationBatch {
    pub fn touches(&self, element: ElementId) -> bool {
        self.mutations.iter().any(|m| m.element() == Some(element))
    }
}

/// Element arena rooted at a `body` element.
///
/// Every write goes through the mutation log. Writes that do not change the
/// element are not recorded. Writes performed between [`Document::begin_batch`]
/// and the matching [`Document::commit_batch`] are committed as one
/// [`MutationBatch`]; writes outside a batch each get their own.
#[derive(Debug, Clone)]
pub struct Document {
    elements: Vec<Element>,
    root: ElementId,
    focused: Option<ElementId>,
    batch_depth: usize,
    open_batch: Vec<Mutation>,
    committed: Vec<MutationBatch>,
    next_seq: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            elements: vec![Element::new("body")],
            root: ElementId(0),
            focused: None,
            batch_depth: 0,
            open_batch: Vec::new(),
            committed: Vec::new(),
            next_seq: 0,
        }
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    /// Borrow an element by id.
    ///
    /// Ids are only minted by this document, so lookups cannot miss unless an
    /// id from another document is passed in, which panics.
    pub fn element(&self, id: ElementId) -> &Element {
        &self.elements[id.0]
    }

    pub(crate) fn element_mut(&mut self, id: ElementId) -> &mut Element {
        &mut self.elements[id.0]
    }

    pub fn contains(&self, id: ElementId) -> bool {
        id.0 < self.elements.len()
    }

    /// All elements in creation order
    pub fn elements(&self) -> impl Iterator<Item = (ElementId, &Element)> {
        self.elements
            .iter()
            .enumerate()
            .map(|(i, el)| (ElementId(i), el))
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> ElementId {
        self.elements.push(Element::new(tag));
        ElementId(self.elements.len() - 1)
    }

    /// Attach `child` as the last child of `parent`, detaching it first if needed
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) {
        if let Some(old) = self.elements[child.0].parent.take() {
            self.elements[old.0].children.retain(|c| *c != child);
        }
        self.elements[child.0].parent = Some(parent);
        self.elements[parent.0].children.push(child);
    }

    /// Depth-first descendants of `scope` in document order, excluding `scope`
    pub fn descendants(&self, scope: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self.element(scope).children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.element(id).children.iter().rev().copied());
        }
        out
    }

    /// Whether `ancestor` is `node` or one of its ancestors
    pub fn is_inclusive_ancestor(&self, ancestor: ElementId, node: ElementId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.element(id).parent;
        }
        false
    }

    /// Whether the element and all its ancestors are not hidden
    pub fn is_rendered(&self, id: ElementId) -> bool {
        let mut current = Some(id);
        while let Some(el) = current {
            if self.element(el).hidden {
                return false;
            }
            current = self.element(el).parent;
        }
        true
    }

    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    // --- batching ---

    /// Open (or nest into) an atomic mutation batch
    pub fn begin_batch(&mut self) {
        self.batch_depth += 1;
    }

    /// Close the innermost batch; the outermost close commits it
    pub fn commit_batch(&mut self) {
        self.batch_depth = self.batch_depth.saturating_sub(1);
        if self.batch_depth == 0 && !self.open_batch.is_empty() {
            let mutations = std::mem::take(&mut self.open_batch);
            self.push_batch(mutations);
        }
    }

    /// Run `f` inside one batch
    pub fn batch<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.begin_batch();
        let result = f(self);
        self.commit_batch();
        result
    }

    /// Drain the batches committed since the previous call
    pub fn take_mutations(&mut self) -> Vec<MutationBatch> {
        std::mem::take(&mut self.committed)
    }

    fn push_batch(&mut self, mutations: Vec<Mutation>) {
        self.committed.push(MutationBatch {
            seq: self.next_seq,
            mutations,
        });
        self.next_seq += 1;
    }

    fn record(&mut self, mutation: Mutation) {
        if self.batch_depth > 0 {
            self.open_batch.push(mutation);
        } else {
            self.push_batch(vec![mutation]);
        }
    }

    // --- writes ---

    pub fn set_attribute(&mut self, id: ElementId, name: &str, value: &str) {
        let el = self.element_mut(id);
        if el.attributes.get(name).map(String::as_str) == Some(value) {
            return;
        }
        el.attributes.insert(name.to_string(), value.to_string());
        self.record(Mutation::Attribute {
            element: id,
            name: name.to_string(),
        });
    }

    pub fn add_class(&mut self, id: ElementId, class: &str) {
        if self.element_mut(id).classes.insert(class.to_string()) {
            self.record(Mutation::ClassAdded {
                element: id,
                class: class.to_string(),
            });
        }
    }

    pub fn remove_class(&mut self, id: ElementId, class: &str) {
        if self.element_mut(id).classes.remove(class) {
            self.record(Mutation::ClassRemoved {
                element: id,
                class: class.to_string(),
            });
        }
    }

    pub fn toggle_class(&mut self, id: ElementId, class: &str, on: bool) {
        if on {
            self.add_class(id, class);
        } else {
            self.remove_class(id, class);
        }
    }

    pub fn set_text(&mut self, id: ElementId, text: &str) {
        let el = self.element_mut(id);
        if el.text == text {
            return;
        }
        el.text = text.to_string();
        self.record(Mutation::Text { element: id });
    }

    pub fn set_value(&mut self, id: ElementId, value: &str) {
        let el = self.element_mut(id);
        if el.value == value {
            return;
        }
        el.value = value.to_string();
        self.record(Mutation::Value { element: id });
    }

    pub fn set_checked(&mut self, id: ElementId, checked: bool) {
        let el = self.element_mut(id);
        if el.checked == checked {
            return;
        }
        el.checked = checked;
        self.record(Mutation::Checked {
            element: id,
            checked,
        });
    }

    pub fn set_disabled(&mut self, id: ElementId, disabled: bool) {
        let el = self.element_mut(id);
        if el.disabled == disabled {
            return;
        }
        el.disabled = disabled;
        self.record(Mutation::Disabled {
            element: id,
            disabled,
        });
    }

    pub fn set_hidden(&mut self, id: ElementId, hidden: bool) {
        let el = self.element_mut(id);
        if el.hidden == hidden {
            return;
        }
        el.hidden = hidden;
        self.record(Mutation::Hidden {
            element: id,
            hidden,
        });
    }

    pub fn set_style(&mut self, id: ElementId, prop: StyleProp, value: f32) {
        let el = self.element_mut(id);
        if el.style(prop) == value && el.style.contains_key(&prop) {
            return;
        }
        el.style.insert(prop, value);
        self.record(Mutation::Style {
            element: id,
            prop,
            value,
        });
    }

    pub fn focus(&mut self, id: Option<ElementId>) {
        if self.focused == id {
            return;
        }
        self.focused = id;
        self.record(Mutation::Focus { element: id });
    }
}
