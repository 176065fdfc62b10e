//! Navigation controller
//!
//! Owns the bootstrap sequence, routes host input events to the theme,
//! menu, and scroll sub-managers, runs due deferred tasks, and tears
//! everything down on disposal. A failed bootstrap leaves the
//! controller inert instead of propagating into the host page.

use folio_dom::events::{InputEvent, Key, KeyModifiers, ListenerTarget};
use folio_dom::{Document, NodeId};

use crate::config::{NavConfig, NavOverrides};
use crate::error::NavError;
use crate::menu::{self, MobileMenu};
use crate::schedule::{Scheduler, TaskKind};
use crate::scroll::ScrollTracker;
use crate::state::NavigationState;
use crate::theme::{Theme, ThemeManager};

/// Selector for the theme toggle control
const THEME_TOGGLE_SELECTOR: &str = "#theme-toggle";
/// Selector for the theme icon inside the toggle
const THEME_ICON_SELECTOR: &str = "#theme-icon";

/// Resolved UI elements; menu, toggle, and icon are optional
/// capabilities that degrade to no-ops when absent
#[derive(Debug)]
struct ElementSet {
    navbar: NodeId,
    links: Vec<NodeId>,
    sections: Vec<NodeId>,
    menu: Option<NodeId>,
    theme_toggle: Option<NodeId>,
    theme_icon: Option<NodeId>,
}

impl ElementSet {
    fn resolve(doc: &Document, config: &NavConfig) -> Result<Self, NavError> {
        let navbar = doc
            .query_selector(&config.navbar_selector)
            .ok_or_else(|| NavError::missing(&config.navbar_selector))?;

        let links = doc.query_selector_all(&config.link_selector);
        if links.is_empty() {
            return Err(NavError::missing(&config.link_selector));
        }
        let sections = doc.query_selector_all(&config.section_selector);
        if sections.is_empty() {
            return Err(NavError::missing(&config.section_selector));
        }

        let menu = doc.query_selector(&config.menu_selector);
        if menu.is_none() {
            log::warn!("no menu matches {:?}, mobile menu disabled", config.menu_selector);
        }
        let theme_toggle = doc.query_selector(THEME_TOGGLE_SELECTOR);
        if theme_toggle.is_none() {
            log::warn!("no {THEME_TOGGLE_SELECTOR} element, theme toggle control disabled");
        }
        let theme_icon = doc.query_selector(THEME_ICON_SELECTOR);
        if theme_icon.is_none() {
            log::warn!("no {THEME_ICON_SELECTOR} element, theme icon updates disabled");
        }

        Ok(Self { navbar, links, sections, menu, theme_toggle, theme_icon })
    }
}

#[derive(Debug)]
struct Inner {
    state: NavigationState,
    scheduler: Scheduler,
    theme: ThemeManager,
    menu: MobileMenu,
    tracker: ScrollTracker,
    navbar: NodeId,
    theme_toggle: Option<NodeId>,
    bindings: Vec<(ListenerTarget, &'static str)>,
}

/// Page-navigation controller
///
/// Construct with [`NavigationController::new`] (inert on failure) or
/// [`NavigationController::try_new`]; drive it with
/// [`handle_event`](NavigationController::handle_event) and
/// [`advance`](NavigationController::advance).
#[derive(Debug)]
pub struct NavigationController {
    inner: Option<Inner>,
}

impl NavigationController {
    /// Initialize against a document. Any initialization error is
    /// logged and yields an inert controller; a decorative feature
    /// must not take the host page down with it.
    pub fn new(doc: &mut Document, overrides: NavOverrides) -> Self {
        match Self::try_new(doc, overrides) {
            Ok(controller) => controller,
            Err(e) => {
                log::error!("navigation disabled: {e}");
                Self { inner: None }
            }
        }
    }

    /// Initialize, surfacing fatal element-resolution failures
    pub fn try_new(doc: &mut Document, overrides: NavOverrides) -> Result<Self, NavError> {
        let config = NavConfig::resolve(overrides);
        let elements = ElementSet::resolve(doc, &config)?;

        let mut state = NavigationState::default();
        let mut scheduler = Scheduler::new();
        let mut theme = ThemeManager::new(elements.theme_toggle, elements.theme_icon);
        let mut tracker = ScrollTracker::new(
            elements.navbar,
            elements.links,
            elements.sections,
            &config,
        );

        let menu_toggle = menu::ensure_toggle(doc, elements.navbar);
        let menu = MobileMenu::new(elements.menu, menu_toggle);

        let mut bindings: Vec<(ListenerTarget, &'static str)> = vec![
            (ListenerTarget::Document, "scroll"),
            (ListenerTarget::Document, "resize"),
            (ListenerTarget::Document, "keydown"),
            (ListenerTarget::Document, "click"),
            (ListenerTarget::Element(menu_toggle), "click"),
        ];
        for &link in tracker.links() {
            bindings.push((ListenerTarget::Element(link), "click"));
        }
        if let Some(toggle) = elements.theme_toggle {
            bindings.push((ListenerTarget::Element(toggle), "click"));
        }
        for &(target, event_type) in &bindings {
            doc.listeners.bind(target, event_type);
        }

        tracker.select_initial(doc, &mut state, &mut scheduler);
        theme.load_saved_theme(doc, &mut state, &mut scheduler);

        log::info!(
            "navigation ready: {} links, {} sections, theme {}",
            tracker.links().len(),
            tracker.sections().len(),
            state.theme.as_str()
        );

        Ok(Self {
            inner: Some(Inner {
                state,
                scheduler,
                theme,
                menu,
                tracker,
                navbar: elements.navbar,
                theme_toggle: elements.theme_toggle,
                bindings,
            }),
        })
    }

    /// True when initialization failed or the controller was destroyed
    pub fn is_inert(&self) -> bool {
        self.inner.is_none()
    }

    /// Resolved theme; an inert controller reports the dark default
    pub fn current_theme(&self) -> Theme {
        self.inner.as_ref().map(|i| i.state.theme).unwrap_or_default()
    }

    /// Section id of the currently active link
    pub fn current_section(&self) -> Option<&str> {
        self.inner.as_ref()?.state.current_section.as_deref()
    }

    /// Whether the mobile menu is open
    pub fn is_menu_open(&self) -> bool {
        self.inner.as_ref().is_some_and(|i| i.state.menu_open)
    }

    /// Handle one host input event
    pub fn handle_event(&mut self, doc: &mut Document, event: InputEvent) {
        let Some(inner) = self.inner.as_mut() else { return };
        match event {
            InputEvent::Click { target } => inner.handle_click(doc, target),
            InputEvent::Scroll { y } => {
                doc.set_scroll_y(y);
                let now = inner.scheduler.now();
                inner.tracker.handle_scroll(doc, &mut inner.state, now);
            }
            InputEvent::Resize { width, height } => {
                doc.set_viewport(width, height);
                if width > menu::DESKTOP_BREAKPOINT_PX && inner.state.menu_open {
                    inner.menu.close(doc, &mut inner.state);
                }
            }
            InputEvent::KeyDown { key, modifiers } => inner.handle_key(doc, key, modifiers),
        }
    }

    /// Advance the logical clock and run tasks that came due
    pub fn advance(&mut self, doc: &mut Document, ms: u64) {
        let Some(inner) = self.inner.as_mut() else { return };
        for kind in inner.scheduler.advance(ms) {
            match kind {
                TaskKind::ScrollSettle => inner.tracker.settle(&mut inner.state),
                TaskKind::ThemeTransitionEnd => inner.theme.end_transition(doc),
                TaskKind::InitialHashScroll => {
                    inner
                        .tracker
                        .run_pending_hash_scroll(doc, &mut inner.state, &mut inner.scheduler);
                }
            }
        }
    }

    /// Tear down: disconnect the observer, cancel pending tasks, and
    /// unregister listeners. The controller is inert afterwards.
    pub fn destroy(&mut self, doc: &mut Document) {
        let Some(mut inner) = self.inner.take() else { return };
        inner.tracker.disconnect();
        inner.scheduler.cancel_all();
        for (target, event_type) in inner.bindings.drain(..) {
            doc.listeners.unbind(target, event_type);
        }
    }
}

impl Inner {
    fn handle_click(&mut self, doc: &mut Document, target: NodeId) {
        if let Some(toggle) = self.theme_toggle {
            if doc.contains(toggle, target) {
                self.theme
                    .toggle_theme(doc, &mut self.state, &mut self.scheduler);
                return;
            }
        }

        let menu_toggle = self.menu.toggle_element();
        if doc.contains(menu_toggle, target) {
            self.menu.toggle(doc, &mut self.state);
            return;
        }

        let clicked_link = self
            .tracker
            .links()
            .iter()
            .copied()
            .find(|&link| doc.contains(link, target));
        if let Some(link) = clicked_link {
            // Default fragment navigation is suppressed; the controller
            // scrolls instead.
            if self
                .tracker
                .navigate(doc, &mut self.state, &mut self.scheduler, link)
            {
                self.menu.close(doc, &mut self.state);
            }
            return;
        }

        if !doc.contains(self.navbar, target) && self.state.menu_open {
            self.menu.close(doc, &mut self.state);
        }
    }

    fn handle_key(&mut self, doc: &mut Document, key: Key, modifiers: KeyModifiers) {
        match key {
            Key::Escape => {
                if self.state.menu_open {
                    self.menu.close(doc, &mut self.state);
                }
            }
            // Shift stays allowed so an uppercase T still works.
            Key::Char('t') | Key::Char('T')
                if !modifiers.ctrl && !modifiers.alt && !modifiers.meta =>
            {
                self.theme
                    .toggle_theme(doc, &mut self.state, &mut self.scheduler);
            }
            Key::Enter | Key::Space => {
                if let Some(toggle) = self.theme_toggle {
                    if doc.focused() == Some(toggle) {
                        self.theme
                            .toggle_theme(doc, &mut self.state, &mut self.scheduler);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Construct a default-configured controller for a document and hand
/// the instance back to the caller
pub fn bootstrap(doc: &mut Document) -> NavigationController {
    NavigationController::new(doc, NavOverrides::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_navbar_is_fatal() {
        let mut doc = Document::new(1280.0, 800.0);
        let err = NavigationController::try_new(&mut doc, NavOverrides::default()).unwrap_err();
        assert!(matches!(err, NavError::MissingElement { ref selector } if selector == ".navbar"));

        // The catching constructor degrades to an inert controller.
        let mut controller = NavigationController::new(&mut doc, NavOverrides::default());
        assert!(controller.is_inert());
        controller.handle_event(&mut doc, InputEvent::Scroll { y: 100.0 });
        assert_eq!(controller.current_theme(), Theme::Dark);
    }
}
