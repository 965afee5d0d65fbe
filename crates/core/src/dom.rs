//! Minimal single-threaded element tree for the mount runtime.
//!
//! In the browser the host document is supplied by the platform; here the
//! crate carries its own small tree so the manager (and its tests) have
//! something concrete to scan and mutate. Structural changes bump a
//! monotonically increasing revision, which is the explicit stand-in for a
//! mutation observer: hosts compare revisions instead of receiving
//! callbacks, and several mutations in one event-loop turn coalesce into a
//! single serviced pass.
//!
//! Attribute writes are deliberately non-structural; setting the mounted
//! marker on a container must not look like new content arriving.

use crate::error::DomError;
use std::collections::BTreeMap;

/// Stable identity of one element for the lifetime of the document.
///
/// Keys survive tree mutations and are never reused, so they can identify
/// an element that carries no id (for example when warning about a
/// malformed container exactly once).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey(u64);

/// One element in the tree.
#[derive(Debug, Clone)]
pub struct Element {
    tag: String,
    attributes: BTreeMap<String, String>,
    children: Vec<Element>,
    inner_html: Option<String>,
    key: Option<NodeKey>,
}

impl Element {
    /// Creates an element with the given tag and no attributes.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
            inner_html: None,
            key: None,
        }
    }

    /// Sets the element id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.attributes.insert("id".to_string(), id.into());
        self
    }

    /// Appends a class token to the class attribute.
    pub fn with_class(mut self, class: impl AsRef<str>) -> Self {
        let entry = self.attributes.entry("class".to_string()).or_default();
        if !entry.is_empty() {
            entry.push(' ');
        }
        entry.push_str(class.as_ref());
        self
    }

    /// Sets an arbitrary attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Appends a child element.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// The element's tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The element's id attribute, if any.
    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    /// An attribute value, if present.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Whitespace-separated class tokens.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attribute("class")
            .unwrap_or_default()
            .split_whitespace()
    }

    /// Whether the class attribute contains the given token.
    pub fn has_class(&self, token: &str) -> bool {
        self.classes().any(|c| c == token)
    }

    /// Child elements in document order.
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Rendered inner HTML, if a renderer has been attached.
    pub fn inner_html(&self) -> Option<&str> {
        self.inner_html.as_deref()
    }

    /// The document-assigned node key; `None` until inserted.
    pub fn key(&self) -> Option<NodeKey> {
        self.key
    }

    fn find(&self, id: &str) -> Option<&Element> {
        if self.id() == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut Element> {
        if self.id() == Some(id) {
            return Some(self);
        }
        self.children
            .iter_mut()
            .find_map(|child| child.find_mut(id))
    }

    fn find_by_key(&self, key: NodeKey) -> Option<&Element> {
        if self.key == Some(key) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find_by_key(key))
    }

    fn find_by_key_mut(&mut self, key: NodeKey) -> Option<&mut Element> {
        if self.key == Some(key) {
            return Some(self);
        }
        self.children
            .iter_mut()
            .find_map(|child| child.find_by_key_mut(key))
    }

    fn remove_by_id(&mut self, id: &str) -> bool {
        if let Some(index) = self.children.iter().position(|c| c.id() == Some(id)) {
            self.children.remove(index);
            return true;
        }
        self.children.iter_mut().any(|child| child.remove_by_id(id))
    }

    fn each<'a>(&'a self, f: &mut impl FnMut(&'a Element)) {
        f(self);
        for child in &self.children {
            child.each(f);
        }
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_attr(value));
            out.push('"');
        }
        out.push('>');
        if let Some(html) = &self.inner_html {
            out.push_str(html);
        }
        for child in &self.children {
            child.write_html(out);
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
}

/// The mutable host document.
#[derive(Debug)]
pub struct Document {
    body: Element,
    revision: u64,
    next_key: u64,
}

impl Document {
    /// Creates a document with an empty body.
    pub fn new() -> Self {
        let mut doc = Self {
            body: Element::new("body"),
            revision: 0,
            next_key: 0,
        };
        let key = doc.allocate_key();
        doc.body.key = Some(key);
        doc
    }

    /// The current structural revision.
    ///
    /// Advances on every mutation that could introduce or remove elements;
    /// attribute writes do not advance it.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The body element.
    pub fn body(&self) -> &Element {
        &self.body
    }

    /// Appends an element (and its subtree) to the body.
    pub fn append_to_body(&mut self, element: Element) -> NodeKey {
        let (key, element) = self.adopt(element);
        self.body.children.push(element);
        self.bump();
        key
    }

    /// Appends an element under the element with the given id.
    pub fn append_child(&mut self, parent_id: &str, element: Element) -> Result<NodeKey, DomError> {
        if self.body.find(parent_id).is_none() {
            return Err(DomError::NoSuchElement(parent_id.to_string()));
        }
        let (key, element) = self.adopt(element);
        let parent = self
            .body
            .find_mut(parent_id)
            .ok_or_else(|| DomError::NoSuchElement(parent_id.to_string()))?;
        parent.children.push(element);
        self.bump();
        Ok(key)
    }

    /// Removes the element with the given id, along with its subtree.
    pub fn remove(&mut self, element_id: &str) -> Result<(), DomError> {
        if self.body.remove_by_id(element_id) {
            self.bump();
            Ok(())
        } else {
            Err(DomError::NoSuchElement(element_id.to_string()))
        }
    }

    /// Replaces the entire body content (a client-side content swap).
    pub fn replace_body(&mut self, children: Vec<Element>) {
        self.body.children = children
            .into_iter()
            .map(|child| self.adopt(child).1)
            .collect();
        self.bump();
    }

    /// Finds an element by id, in document order.
    pub fn find(&self, element_id: &str) -> Option<&Element> {
        self.body.find(element_id)
    }

    /// Finds an element by node key.
    pub fn find_by_key(&self, key: NodeKey) -> Option<&Element> {
        self.body.find_by_key(key)
    }

    /// Sets an attribute on the element with the given id. Non-structural.
    pub fn set_attribute(
        &mut self,
        element_id: &str,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), DomError> {
        let element = self
            .body
            .find_mut(element_id)
            .ok_or_else(|| DomError::NoSuchElement(element_id.to_string()))?;
        element.attributes.insert(name.into(), value.into());
        Ok(())
    }

    /// Sets an attribute on the element with the given node key. Non-structural.
    pub fn set_attribute_at(
        &mut self,
        key: NodeKey,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), DomError> {
        let element = self
            .body
            .find_by_key_mut(key)
            .ok_or(DomError::StaleNodeKey)?;
        element.attributes.insert(name.into(), value.into());
        Ok(())
    }

    /// Replaces the inner HTML of the element with the given id.
    pub fn set_inner_html(&mut self, element_id: &str, html: impl Into<String>) -> Result<(), DomError> {
        let element = self
            .body
            .find_mut(element_id)
            .ok_or_else(|| DomError::NoSuchElement(element_id.to_string()))?;
        element.children.clear();
        element.inner_html = Some(html.into());
        self.bump();
        Ok(())
    }

    /// Replaces the inner HTML of the element with the given node key.
    pub fn set_inner_html_at(&mut self, key: NodeKey, html: impl Into<String>) -> Result<(), DomError> {
        let element = self
            .body
            .find_by_key_mut(key)
            .ok_or(DomError::StaleNodeKey)?;
        element.children.clear();
        element.inner_html = Some(html.into());
        self.bump();
        Ok(())
    }

    /// Visits every element in document order (body first, then pre-order).
    pub fn each_element<'a>(&'a self, mut f: impl FnMut(&'a Element)) {
        self.body.each(&mut f);
    }

    /// Serializes the body to HTML. Intended for tests and demos.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.body.write_html(&mut out);
        out
    }

    fn bump(&mut self) {
        self.revision += 1;
    }

    fn allocate_key(&mut self) -> NodeKey {
        self.next_key += 1;
        NodeKey(self.next_key)
    }

    fn adopt(&mut self, mut element: Element) -> (NodeKey, Element) {
        let key = self.allocate_key();
        element.key = Some(key);
        element.children = element
            .children
            .into_iter()
            .map(|child| self.adopt(child).1)
            .collect();
        (key, element)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container(block_type: &str, instance: u32) -> Element {
        Element::new("div")
            .with_id(format!("{block_type}-{instance}"))
            .with_class(format!("{block_type}-container"))
    }

    #[test]
    fn structural_mutations_advance_revision() {
        let mut doc = Document::new();
        let before = doc.revision();
        doc.append_to_body(container("hero", 1));
        assert!(doc.revision() > before);

        let at_append = doc.revision();
        doc.remove("hero-1").expect("hero-1 exists");
        assert!(doc.revision() > at_append);
    }

    #[test]
    fn attribute_writes_do_not_advance_revision() {
        let mut doc = Document::new();
        doc.append_to_body(container("hero", 1));
        let revision = doc.revision();
        doc.set_attribute("hero-1", "data-mounted", "true")
            .expect("hero-1 exists");
        assert_eq!(doc.revision(), revision);
        assert_eq!(
            doc.find("hero-1").and_then(|el| el.attribute("data-mounted")),
            Some("true")
        );
    }

    #[test]
    fn set_inner_html_replaces_children() {
        let mut doc = Document::new();
        doc.append_to_body(container("hero", 1).with_child(Element::new("span")));
        doc.set_inner_html("hero-1", "<h1>Welcome</h1>")
            .expect("hero-1 exists");

        let hero = doc.find("hero-1").expect("hero-1 exists");
        assert!(hero.children().is_empty());
        assert_eq!(hero.inner_html(), Some("<h1>Welcome</h1>"));
    }

    #[test]
    fn node_keys_are_stable_across_mutations() {
        let mut doc = Document::new();
        let hero_key = doc.append_to_body(container("hero", 1));
        doc.append_to_body(container("navbar", 2));
        doc.remove("navbar-2").expect("navbar-2 exists");

        let hero = doc.find_by_key(hero_key).expect("hero-1 still present");
        assert_eq!(hero.id(), Some("hero-1"));
    }

    #[test]
    fn removed_elements_are_not_found() {
        let mut doc = Document::new();
        let key = doc.append_to_body(container("hero", 1));
        doc.remove("hero-1").expect("hero-1 exists");

        assert!(doc.find("hero-1").is_none());
        assert!(doc.find_by_key(key).is_none());
        assert_eq!(
            doc.remove("hero-1"),
            Err(DomError::NoSuchElement("hero-1".to_string()))
        );
    }

    #[test]
    fn each_element_walks_in_document_order() {
        let mut doc = Document::new();
        doc.append_to_body(
            Element::new("main")
                .with_id("main")
                .with_child(container("hero", 1))
                .with_child(container("blog", 1)),
        );
        doc.append_to_body(container("footer", 1));

        let mut ids = Vec::new();
        doc.each_element(|el| {
            if let Some(id) = el.id() {
                ids.push(id.to_string());
            }
        });
        assert_eq!(ids, vec!["main", "hero-1", "blog-1", "footer-1"]);
    }

    #[test]
    fn to_html_escapes_attribute_values() {
        let mut doc = Document::new();
        doc.append_to_body(
            Element::new("div")
                .with_id("hero-1")
                .with_attribute("title", "a \"quoted\" <value>"),
        );
        let html = doc.to_html();
        assert!(html.contains("title=\"a &quot;quoted&quot; &lt;value>\""));
    }
}
