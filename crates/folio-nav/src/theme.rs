//! Theme management
//!
//! Two-state light/dark machine. Dark is the unmarked default; light
//! adds a marker class to the document root. The resolved value is
//! persisted under a single storage key and reloaded at startup.

use folio_dom::{Document, NodeId};

use crate::schedule::{Scheduler, TaskId, TaskKind};
use crate::state::NavigationState;

/// Storage key for the persisted preference
pub const STORAGE_KEY: &str = "portfolio-theme";
/// Marker class on the document root while light is active
pub const LIGHT_CLASS: &str = "light-theme";
/// Transient marker on the body during the theme crossfade
pub const TRANSITION_CLASS: &str = "theme-transition";
/// How long the crossfade marker stays on the body
pub const TRANSITION_MS: u64 = 300;

/// Visual theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// Parse a persisted value; anything but the two exact names is
    /// treated as absent
    pub fn from_persisted(value: &str) -> Option<Theme> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    /// Canonical persisted name
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// The other theme
    pub fn opposite(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Theme toggling, icon/label updates, and persistence
#[derive(Debug)]
pub struct ThemeManager {
    toggle: Option<NodeId>,
    icon: Option<NodeId>,
    transition_task: Option<TaskId>,
}

impl ThemeManager {
    /// Create with the optional toggle/icon capabilities resolved at
    /// initialization
    pub fn new(toggle: Option<NodeId>, icon: Option<NodeId>) -> Self {
        Self { toggle, icon, transition_task: None }
    }

    /// Flip to the opposite theme
    pub fn toggle_theme(
        &mut self,
        doc: &mut Document,
        state: &mut NavigationState,
        scheduler: &mut Scheduler,
    ) {
        let next = state.theme.opposite();
        self.set_theme(doc, state, scheduler, next);
    }

    /// Apply a theme: root marker, icon, label, persistence, crossfade
    pub fn set_theme(
        &mut self,
        doc: &mut Document,
        state: &mut NavigationState,
        scheduler: &mut Scheduler,
        theme: Theme,
    ) {
        state.theme = theme;

        let root = doc.root();
        doc.element_mut(root)
            .classes
            .set(LIGHT_CLASS, theme == Theme::Light);

        // The icon and label describe the state the control switches to.
        let (glyph, label) = match theme {
            Theme::Light => ("\u{1F319}", "Switch to dark theme"),
            Theme::Dark => ("\u{2600}\u{FE0F}", "Switch to light theme"),
        };
        if let Some(icon) = self.icon {
            doc.element_mut(icon).text = glyph.to_string();
        }
        if let Some(toggle) = self.toggle {
            doc.element_mut(toggle).set_attribute("aria-label", label);
        }

        if let Err(e) = doc.storage.set(STORAGE_KEY, theme.as_str()) {
            log::warn!("could not persist theme preference: {e}");
        }

        let body = doc.body();
        doc.element_mut(body).classes.add(TRANSITION_CLASS);
        if let Some(task) = self.transition_task.take() {
            scheduler.cancel(task);
        }
        self.transition_task = Some(scheduler.schedule(TRANSITION_MS, TaskKind::ThemeTransitionEnd));
    }

    /// Apply a theme given by name; unknown names are corrected to dark
    pub fn set_theme_named(
        &mut self,
        doc: &mut Document,
        state: &mut NavigationState,
        scheduler: &mut Scheduler,
        name: &str,
    ) {
        let theme = Theme::from_persisted(name).unwrap_or_else(|| {
            log::warn!("invalid theme {name:?}, falling back to dark");
            Theme::Dark
        });
        self.set_theme(doc, state, scheduler, theme);
    }

    /// Load the persisted preference; missing, corrupt, or unreadable
    /// values resolve to dark
    pub fn load_saved_theme(
        &mut self,
        doc: &mut Document,
        state: &mut NavigationState,
        scheduler: &mut Scheduler,
    ) {
        let theme = match doc.storage.get(STORAGE_KEY) {
            Ok(Some(value)) => Theme::from_persisted(&value).unwrap_or(Theme::Dark),
            Ok(None) => Theme::Dark,
            Err(e) => {
                log::warn!("could not read theme preference: {e}");
                Theme::Dark
            }
        };
        self.set_theme(doc, state, scheduler, theme);
    }

    /// The crossfade window elapsed; drop the body marker
    pub fn end_transition(&mut self, doc: &mut Document) {
        let body = doc.body();
        doc.element_mut(body).classes.remove(TRANSITION_CLASS);
        self.transition_task = None;
    }
}
