//! Mobile menu management
//!
//! Binary open/closed state. The controller's `menu_open` flag is the
//! single source of truth; the menu's class, the toggle's
//! aria-expanded, and the body marker mirror it.

use folio_dom::{Document, NodeId};

use crate::state::NavigationState;

/// Class on the menu container while open
pub const OPEN_CLASS: &str = "open";
/// Body marker while the menu is open (suppresses background scroll)
pub const BODY_OPEN_CLASS: &str = "menu-open";
/// Viewport width above which the mobile menu concept does not apply
pub const DESKTOP_BREAKPOINT_PX: f64 = 768.0;

/// Collapsible mobile menu; all operations no-op when the menu
/// capability is absent
#[derive(Debug)]
pub struct MobileMenu {
    menu: Option<NodeId>,
    toggle: NodeId,
}

impl MobileMenu {
    /// Create with the optional menu container and the (found or
    /// synthesized) hamburger toggle
    pub fn new(menu: Option<NodeId>, toggle: NodeId) -> Self {
        Self { menu, toggle }
    }

    /// The hamburger toggle element
    pub fn toggle_element(&self) -> NodeId {
        self.toggle
    }

    /// Open the menu
    pub fn open(&self, doc: &mut Document, state: &mut NavigationState) {
        let Some(menu) = self.menu else { return };
        state.menu_open = true;
        doc.element_mut(menu).classes.add(OPEN_CLASS);
        doc.element_mut(self.toggle)
            .set_attribute("aria-expanded", "true");
        let body = doc.body();
        doc.element_mut(body).classes.add(BODY_OPEN_CLASS);
    }

    /// Close the menu
    pub fn close(&self, doc: &mut Document, state: &mut NavigationState) {
        let Some(menu) = self.menu else { return };
        state.menu_open = false;
        doc.element_mut(menu).classes.remove(OPEN_CLASS);
        doc.element_mut(self.toggle)
            .set_attribute("aria-expanded", "false");
        let body = doc.body();
        doc.element_mut(body).classes.remove(BODY_OPEN_CLASS);
    }

    /// Flip between open and closed
    pub fn toggle(&self, doc: &mut Document, state: &mut NavigationState) {
        if state.menu_open {
            self.close(doc, state);
        } else {
            self.open(doc, state);
        }
    }
}

/// Find a `.nav-toggle` inside the navbar, or synthesize one: a button
/// with accessibility attributes preset to closed and three decorative
/// bars, inserted into the navbar's `.nav-container`
pub fn ensure_toggle(doc: &mut Document, navbar: NodeId) -> NodeId {
    if let Some(existing) = doc
        .query_selector_all(".nav-toggle")
        .into_iter()
        .find(|&n| doc.contains(navbar, n))
    {
        return existing;
    }

    let button = doc.create_element("button");
    {
        let el = doc.element_mut(button);
        el.classes.add("nav-toggle");
        el.set_attribute("aria-label", "Toggle navigation menu");
        el.set_attribute("aria-expanded", "false");
    }
    for _ in 0..3 {
        let bar = doc.create_element("span");
        doc.element_mut(bar).classes.add("bar");
        doc.append_child(button, bar);
    }

    let container = doc
        .query_selector_all(".nav-container")
        .into_iter()
        .find(|&n| doc.contains(navbar, n));
    match container {
        Some(container) => doc.append_child(container, button),
        None => {
            log::warn!("navbar has no .nav-container, appending menu toggle to navbar");
            doc.append_child(navbar, button);
        }
    }
    button
}
