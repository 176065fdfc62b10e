//! Navigation state
//!
//! Single-owner mutable state, touched only by the controller's own
//! handlers.

use crate::theme::Theme;

/// Mutable controller state
#[derive(Debug, Default)]
pub struct NavigationState {
    /// A programmatic smooth scroll is in flight
    pub is_animating_scroll: bool,
    /// Section id of the currently active link
    pub current_section: Option<String>,
    /// Last observed vertical scroll offset
    pub last_scroll_y: f64,
    /// Resolved theme
    pub theme: Theme,
    /// Canonical mobile-menu state; the menu's class mirrors this
    pub menu_open: bool,
}
