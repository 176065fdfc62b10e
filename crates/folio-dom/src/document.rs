//! Document and element arena
//!
//! Holds the element tree, viewport and scroll state, the URL
//! fragment, keyboard focus, web storage, and the log of issued
//! scroll requests.

use std::collections::HashMap;

use crate::events::ListenerRegistry;
use crate::storage::Storage;
use crate::{ClassList, NodeId, Rect, Selector};

/// Scroll animation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    Auto,
    #[default]
    Smooth,
    Instant,
}

/// A scroll issued against the document
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    pub y: f64,
    pub behavior: ScrollBehavior,
}

/// An element in the arena
#[derive(Debug)]
pub struct Element {
    /// Tag name, lowercase
    pub tag: String,
    /// Value of the `id` attribute, if any
    pub id: Option<String>,
    /// Class tokens
    pub classes: ClassList,
    /// Attributes other than `id` and `class`
    pub attributes: HashMap<String, String>,
    /// Layout rect in document coordinates
    pub rect: Rect,
    /// Text content (glyphs, labels)
    pub text: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Element {
    /// Create a detached element
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            id: None,
            classes: ClassList::new(),
            attributes: HashMap::new(),
            rect: Rect::default(),
            text: String::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// Set the `id` attribute
    pub fn set_id(&mut self, id: &str) {
        self.id = Some(id.to_string());
    }

    /// Set an attribute value
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }

    /// Get an attribute value
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|v| v.as_str())
    }

    /// Remove an attribute
    pub fn remove_attribute(&mut self, name: &str) {
        self.attributes.remove(name);
    }

    /// Attribute presence, `id` included
    pub fn has_attribute(&self, name: &str) -> bool {
        if name == "id" {
            return self.id.is_some();
        }
        self.attributes.contains_key(name)
    }

    /// Top edge in document coordinates
    pub fn offset_top(&self) -> f64 {
        self.rect.y
    }

    /// Parent node, if attached
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child nodes in insertion order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Headless document: element arena plus browsing context state
#[derive(Debug)]
pub struct Document {
    elements: Vec<Element>,
    root: NodeId,
    body: NodeId,
    viewport_width: f64,
    viewport_height: f64,
    scroll_y: f64,
    fragment: Option<String>,
    focused: Option<NodeId>,
    scroll_requests: Vec<ScrollRequest>,
    /// Web storage for the page's origin
    pub storage: Storage,
    /// Registered event listeners
    pub listeners: ListenerRegistry,
}

impl Document {
    /// Create a document with an `html` root and `body` child
    pub fn new(viewport_width: f64, viewport_height: f64) -> Self {
        let mut doc = Self {
            elements: Vec::new(),
            root: NodeId(0),
            body: NodeId(0),
            viewport_width,
            viewport_height,
            scroll_y: 0.0,
            fragment: None,
            focused: None,
            scroll_requests: Vec::new(),
            storage: Storage::new(),
            listeners: ListenerRegistry::new(),
        };
        let root = doc.create_element("html");
        let body = doc.create_element("body");
        doc.root = root;
        doc.body = body;
        doc.append_child(root, body);
        doc
    }

    /// Document root (`html`)
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Document body
    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Allocate a detached element in the arena
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.elements.len() as u32);
        self.elements.push(Element::new(tag));
        id
    }

    /// Append a child to a parent, detaching it from any previous parent
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(old_parent) = self.elements[child.index()].parent {
            self.elements[old_parent.index()]
                .children
                .retain(|&c| c != child);
        }
        self.elements[child.index()].parent = Some(parent);
        self.elements[parent.index()].children.push(child);
    }

    /// Borrow an element
    pub fn element(&self, id: NodeId) -> &Element {
        &self.elements[id.index()]
    }

    /// Mutably borrow an element
    pub fn element_mut(&mut self, id: NodeId) -> &mut Element {
        &mut self.elements[id.index()]
    }

    /// First element with the given `id` attribute
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.node_ids()
            .find(|&n| self.elements[n.index()].id.as_deref() == Some(id))
    }

    /// First element matching a selector string
    pub fn query_selector(&self, selector: &str) -> Option<NodeId> {
        let sel = Selector::parse(selector)?;
        self.node_ids().find(|&n| sel.matches(&self.elements[n.index()]))
    }

    /// All elements matching a selector string, in arena order
    pub fn query_selector_all(&self, selector: &str) -> Vec<NodeId> {
        let Some(sel) = Selector::parse(selector) else {
            return Vec::new();
        };
        self.node_ids()
            .filter(|&n| sel.matches(&self.elements[n.index()]))
            .collect()
    }

    /// True when `node` is `ancestor` or lies in its subtree
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.elements[n.index()].parent;
        }
        false
    }

    /// Viewport size as (width, height)
    pub fn viewport(&self) -> (f64, f64) {
        (self.viewport_width, self.viewport_height)
    }

    /// Resize the viewport
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    /// Current vertical scroll offset
    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    /// Set the scroll offset directly (user scrolling)
    pub fn set_scroll_y(&mut self, y: f64) {
        self.scroll_y = y.max(0.0);
    }

    /// Issue a programmatic scroll; the request is recorded and the
    /// offset applied immediately (animation is the host's concern)
    pub fn scroll_to(&mut self, y: f64, behavior: ScrollBehavior) {
        let y = y.max(0.0);
        self.scroll_requests.push(ScrollRequest { y, behavior });
        self.scroll_y = y;
    }

    /// All programmatic scrolls issued so far
    pub fn scroll_requests(&self) -> &[ScrollRequest] {
        &self.scroll_requests
    }

    /// URL fragment (`#id` without the hash), if any
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Set the URL fragment
    pub fn set_fragment(&mut self, fragment: &str) {
        self.fragment = Some(fragment.trim_start_matches('#').to_string());
    }

    /// Currently focused element
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Move keyboard focus
    pub fn set_focus(&mut self, node: Option<NodeId>) {
        self.focused = node;
    }

    fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.elements.len() as u32).map(NodeId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_doc() -> Document {
        let mut doc = Document::new(1280.0, 800.0);
        let nav = doc.create_element("nav");
        doc.element_mut(nav).classes.add("navbar");
        let body = doc.body();
        doc.append_child(body, nav);

        let section = doc.create_element("section");
        doc.element_mut(section).set_id("about");
        doc.element_mut(section).rect = Rect::from_xywh(0.0, 600.0, 1280.0, 900.0);
        doc.append_child(body, section);
        doc
    }

    #[test]
    fn test_query_selector() {
        let doc = sample_doc();
        assert!(doc.query_selector(".navbar").is_some());
        assert!(doc.query_selector("#about").is_some());
        assert_eq!(doc.query_selector_all("section[id]").len(), 1);
        assert!(doc.query_selector(".missing").is_none());
    }

    #[test]
    fn test_contains() {
        let mut doc = sample_doc();
        let nav = doc.query_selector(".navbar").unwrap();
        let child = doc.create_element("div");
        doc.append_child(nav, child);

        assert!(doc.contains(nav, child));
        assert!(doc.contains(doc.root(), child));
        let section = doc.query_selector("#about").unwrap();
        assert!(!doc.contains(nav, section));
    }

    #[test]
    fn test_scroll_to_records_request() {
        let mut doc = sample_doc();
        doc.scroll_to(520.0, ScrollBehavior::Smooth);
        assert_eq!(doc.scroll_y(), 520.0);
        assert_eq!(
            doc.scroll_requests(),
            &[ScrollRequest { y: 520.0, behavior: ScrollBehavior::Smooth }]
        );
    }

    #[test]
    fn test_scroll_to_clamps_negative() {
        let mut doc = sample_doc();
        doc.scroll_to(-40.0, ScrollBehavior::Instant);
        assert_eq!(doc.scroll_y(), 0.0);
    }

    #[test]
    fn test_reparenting_detaches() {
        let mut doc = sample_doc();
        let nav = doc.query_selector(".navbar").unwrap();
        let child = doc.create_element("span");
        doc.append_child(nav, child);
        let section = doc.query_selector("#about").unwrap();
        doc.append_child(section, child);

        assert!(!doc.element(nav).children().contains(&child));
        assert_eq!(doc.element(child).parent(), Some(section));
    }
}
