//! Document - In-Memory Element Tree
//!
//! An arena of elements rooted at `<html>` with a single `<body>` child.
//! Removed elements stay in the arena but are detached, so stale ids are
//! answered with `contains() == false` instead of panicking. Detached
//! elements are never reclaimed, so the arena grows for the life of the page
//! with every transient notification, overlay and field error.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Handle to an element in a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(usize);

/// A single element
#[derive(Debug, Clone)]
pub struct Element {
    tag: String,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    text: String,
    value: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            classes: Vec::new(),
            attrs: BTreeMap::new(),
            style: BTreeMap::new(),
            text: String::new(),
            value: String::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    /// Whether this is an input, textarea or select
    pub fn is_form_field(&self) -> bool {
        matches!(self.tag.as_str(), "input" | "textarea" | "select")
    }

    /// The `type` of a form field, `text` when unset
    pub fn field_type(&self) -> &str {
        match self.tag.as_str() {
            "textarea" => "textarea",
            "select" => "select",
            _ => self.attr("type").unwrap_or("text"),
        }
    }

    pub fn is_required(&self) -> bool {
        self.attrs.contains_key("required")
    }
}

/// The page's element tree
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Element>,
    root: ElementId,
    body: ElementId,
    active_element: Option<ElementId>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty `<html><body></body></html>` document
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: vec![Element::new("html")],
            root: ElementId(0),
            body: ElementId(0),
            active_element: None,
        };
        let body = doc.create_element("body");
        doc.append_child(doc.root, body);
        doc.body = body;
        doc
    }

    /// The `<html>` element
    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn body(&self) -> ElementId {
        self.body
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.nodes.get(id.0)
    }

    fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.nodes.get_mut(id.0)
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> ElementId {
        self.nodes.push(Element::new(tag));
        ElementId(self.nodes.len() - 1)
    }

    /// Start building an element; see [`ElementBuilder`]
    pub fn build(&mut self, tag: &str) -> ElementBuilder<'_> {
        let id = self.create_element(tag);
        ElementBuilder { doc: self, id }
    }

    /// Append `child` to `parent`, moving it if it is already attached elsewhere
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) {
        if parent == child || self.element(parent).is_none() || self.element(child).is_none() {
            return;
        }
        // Appending an ancestor under its descendant would create a cycle.
        if self.is_descendant(parent, child) {
            return;
        }
        self.detach(child);
        if let Some(node) = self.element_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.element_mut(parent) {
            node.children.push(child);
        }
    }

    /// Detach an element (and its subtree) from the tree
    pub fn remove(&mut self, id: ElementId) {
        if id == self.root || id == self.body {
            return;
        }
        self.detach(id);
        if self.active_element.is_some_and(|focused| !self.contains(focused)) {
            self.active_element = None;
        }
    }

    fn detach(&mut self, id: ElementId) {
        let Some(parent) = self.element(id).and_then(Element::parent) else {
            return;
        };
        if let Some(node) = self.element_mut(parent) {
            node.children.retain(|c| *c != id);
        }
        if let Some(node) = self.element_mut(id) {
            node.parent = None;
        }
    }

    /// Whether the element is attached to the document
    pub fn contains(&self, id: ElementId) -> bool {
        self.is_descendant(id, self.root)
    }

    /// Whether `id` is `ancestor` or lies inside it
    pub fn is_descendant(&self, id: ElementId, ancestor: ElementId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.element(node).and_then(Element::parent);
        }
        false
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.element(id).and_then(Element::parent)
    }

    /// All elements below `id` in document order (excluding `id`)
    pub fn descendants(&self, id: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self
            .element(id)
            .map(|e| e.children.iter().rev().copied().collect())
            .unwrap_or_default();

        while let Some(next) = stack.pop() {
            out.push(next);
            if let Some(node) = self.element(next) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    /// Attached elements matching a predicate, in document order
    pub fn query(&self, predicate: impl Fn(&Element) -> bool) -> Vec<ElementId> {
        self.query_within(self.root, predicate)
    }

    /// Elements below `scope` matching a predicate, in document order
    pub fn query_within(
        &self,
        scope: ElementId,
        predicate: impl Fn(&Element) -> bool,
    ) -> Vec<ElementId> {
        self.descendants(scope)
            .into_iter()
            .filter(|id| self.element(*id).is_some_and(&predicate))
            .collect()
    }

    pub fn query_class(&self, class: &str) -> Vec<ElementId> {
        self.query(|e| e.has_class(class))
    }

    pub fn query_any_class(&self, classes: &[&str]) -> Vec<ElementId> {
        self.query(|e| classes.iter().any(|c| e.has_class(c)))
    }

    pub fn query_attr(&self, name: &str) -> Vec<ElementId> {
        self.query(|e| e.attr(name).is_some())
    }

    pub fn query_tag(&self, tag: &str) -> Vec<ElementId> {
        self.query(|e| e.tag == tag)
    }

    /// First attached element with the given id attribute
    pub fn get_element_by_id(&self, id: &str) -> Option<ElementId> {
        self.query(|e| e.attr("id") == Some(id)).into_iter().next()
    }

    /// Minimal selector support: `#id`, `.class`, `[attr]` or a tag name
    pub fn query_selector_all(&self, selector: &str) -> Vec<ElementId> {
        let selector = selector.trim();
        if let Some(id) = selector.strip_prefix('#') {
            self.query(|e| e.attr("id") == Some(id))
        } else if let Some(class) = selector.strip_prefix('.') {
            self.query_class(class)
        } else if let Some(attr) = selector.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
            self.query_attr(attr)
        } else {
            self.query_tag(&selector.to_ascii_lowercase())
        }
    }

    pub fn query_selector(&self, selector: &str) -> Option<ElementId> {
        self.query_selector_all(selector).into_iter().next()
    }

    /// Nearest element (starting with `id` itself) carrying `class`
    pub fn closest_class(&self, id: ElementId, class: &str) -> Option<ElementId> {
        self.closest(id, |e| e.has_class(class))
    }

    pub fn closest_tag(&self, id: ElementId, tag: &str) -> Option<ElementId> {
        self.closest(id, |e| e.tag == tag)
    }

    pub fn closest(&self, id: ElementId, predicate: impl Fn(&Element) -> bool) -> Option<ElementId> {
        let mut current = Some(id);
        while let Some(node) = current {
            let element = self.element(node)?;
            if predicate(element) {
                return Some(node);
            }
            current = element.parent;
        }
        None
    }

    // ==================== Classes ====================

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.element(id).is_some_and(|e| e.has_class(class))
    }

    pub fn add_class(&mut self, id: ElementId, class: &str) {
        if let Some(node) = self.element_mut(id) {
            if !node.has_class(class) {
                node.classes.push(class.to_string());
            }
        }
    }

    pub fn remove_class(&mut self, id: ElementId, class: &str) {
        if let Some(node) = self.element_mut(id) {
            node.classes.retain(|c| c != class);
        }
    }

    // ==================== Attributes ====================

    pub fn attr(&self, id: ElementId, name: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.attr(name))
    }

    pub fn set_attr(&mut self, id: ElementId, name: &str, value: impl Into<String>) {
        if let Some(node) = self.element_mut(id) {
            node.attrs.insert(name.to_string(), value.into());
        }
    }

    pub fn remove_attr(&mut self, id: ElementId, name: &str) {
        if let Some(node) = self.element_mut(id) {
            node.attrs.remove(name);
        }
    }

    // ==================== Inline style ====================

    pub fn style(&self, id: ElementId, property: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.style(property))
    }

    /// Set an inline style property; an empty value clears it
    pub fn set_style(&mut self, id: ElementId, property: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(node) = self.element_mut(id) {
            if value.is_empty() {
                node.style.remove(property);
            } else {
                node.style.insert(property.to_string(), value);
            }
        }
    }

    // ==================== Content ====================

    pub fn text(&self, id: ElementId) -> &str {
        self.element(id).map_or("", Element::text)
    }

    pub fn set_text(&mut self, id: ElementId, text: impl Into<String>) {
        if let Some(node) = self.element_mut(id) {
            node.text = text.into();
        }
    }

    pub fn value(&self, id: ElementId) -> &str {
        self.element(id).map_or("", Element::value)
    }

    pub fn set_value(&mut self, id: ElementId, value: impl Into<String>) {
        if let Some(node) = self.element_mut(id) {
            node.value = value.into();
        }
    }

    /// Restore every field of a form to its `value` attribute
    pub fn reset_form(&mut self, form: ElementId) {
        for field in self.query_within(form, Element::is_form_field) {
            let initial = self.attr(field, "value").unwrap_or_default().to_string();
            self.set_value(field, initial);
        }
    }

    // ==================== Focus ====================

    pub fn active_element(&self) -> Option<ElementId> {
        self.active_element
    }

    pub fn focus(&mut self, id: ElementId) {
        if self.contains(id) {
            self.active_element = Some(id);
        }
    }

    pub fn blur(&mut self) {
        self.active_element = None;
    }
}

/// Fluent element construction, mostly for page skeletons and tests
pub struct ElementBuilder<'a> {
    doc: &'a mut Document,
    id: ElementId,
}

impl ElementBuilder<'_> {
    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    pub fn class(self, class: &str) -> Self {
        for c in class.split_whitespace() {
            self.doc.add_class(self.id, c);
        }
        self
    }

    pub fn attr(self, name: &str, value: &str) -> Self {
        self.doc.set_attr(self.id, name, value);
        self
    }

    pub fn text(self, text: &str) -> Self {
        self.doc.set_text(self.id, text);
        self
    }

    pub fn value(self, value: &str) -> Self {
        self.doc.set_value(self.id, value);
        self
    }

    /// Attach under `parent` and return the new element's id
    pub fn append_to(self, parent: ElementId) -> ElementId {
        self.doc.append_child(parent, self.id);
        self.id
    }

    /// Return the id without attaching
    pub fn detached(self) -> ElementId {
        self.id
    }
}
