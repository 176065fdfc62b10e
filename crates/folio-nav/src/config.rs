//! Controller configuration
//!
//! Immutable effective configuration, built once by overlaying caller
//! overrides onto defaults.

use folio_dom::ScrollBehavior;

/// Effective navigation configuration (read-only after construction)
#[derive(Debug, Clone)]
pub struct NavConfig {
    /// Selector for the navigation bar
    pub navbar_selector: String,
    /// Selector for the collapsible menu container
    pub menu_selector: String,
    /// Selector for the navigation links
    pub link_selector: String,
    /// Selector for the navigable sections
    pub section_selector: String,
    /// Class applied to the active link
    pub active_class: String,
    /// Fixed navbar height in pixels (excluded from the observer root)
    pub navbar_height: f64,
    /// Pixels subtracted from a scroll target to clear the fixed navbar
    pub scroll_offset: f64,
    /// Visibility ratio at which a section counts as current (0-1)
    pub observer_threshold: f64,
    /// Scroll animation mode for programmatic scrolls
    pub scroll_behavior: ScrollBehavior,
    /// Scroll-event throttle interval in milliseconds
    pub throttle_ms: u64,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            navbar_selector: ".navbar".into(),
            menu_selector: ".nav-menu".into(),
            link_selector: ".nav-link".into(),
            section_selector: "section[id]".into(),
            active_class: "active".into(),
            navbar_height: 70.0,
            scroll_offset: 80.0,
            observer_threshold: 0.4,
            scroll_behavior: ScrollBehavior::Smooth,
            throttle_ms: 16,
        }
    }
}

/// Caller-supplied overrides; every field optional
#[derive(Debug, Clone, Default)]
pub struct NavOverrides {
    pub navbar_selector: Option<String>,
    pub menu_selector: Option<String>,
    pub link_selector: Option<String>,
    pub section_selector: Option<String>,
    pub active_class: Option<String>,
    pub navbar_height: Option<f64>,
    pub scroll_offset: Option<f64>,
    pub observer_threshold: Option<f64>,
    pub scroll_behavior: Option<ScrollBehavior>,
    pub throttle_ms: Option<u64>,
}

impl NavConfig {
    /// Overlay overrides onto defaults, key by key
    pub fn resolve(overrides: NavOverrides) -> Self {
        let defaults = Self::default();
        Self {
            navbar_selector: overrides.navbar_selector.unwrap_or(defaults.navbar_selector),
            menu_selector: overrides.menu_selector.unwrap_or(defaults.menu_selector),
            link_selector: overrides.link_selector.unwrap_or(defaults.link_selector),
            section_selector: overrides
                .section_selector
                .unwrap_or(defaults.section_selector),
            active_class: overrides.active_class.unwrap_or(defaults.active_class),
            navbar_height: overrides.navbar_height.unwrap_or(defaults.navbar_height),
            scroll_offset: overrides.scroll_offset.unwrap_or(defaults.scroll_offset),
            observer_threshold: overrides
                .observer_threshold
                .unwrap_or(defaults.observer_threshold)
                .clamp(0.0, 1.0),
            scroll_behavior: overrides
                .scroll_behavior
                .unwrap_or(defaults.scroll_behavior),
            throttle_ms: overrides.throttle_ms.unwrap_or(defaults.throttle_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NavConfig::resolve(NavOverrides::default());
        assert_eq!(config.navbar_selector, ".navbar");
        assert_eq!(config.section_selector, "section[id]");
        assert_eq!(config.navbar_height, 70.0);
        assert_eq!(config.observer_threshold, 0.4);
        assert_eq!(config.throttle_ms, 16);
    }

    #[test]
    fn test_overrides_apply_key_by_key() {
        let config = NavConfig::resolve(NavOverrides {
            scroll_offset: Some(120.0),
            active_class: Some("current".into()),
            ..Default::default()
        });
        // Overridden keys take the supplied value.
        assert_eq!(config.scroll_offset, 120.0);
        assert_eq!(config.active_class, "current");
        // Untouched keys keep their defaults.
        assert_eq!(config.navbar_selector, ".navbar");
        assert_eq!(config.throttle_ms, 16);
    }

    #[test]
    fn test_threshold_clamped() {
        let config = NavConfig::resolve(NavOverrides {
            observer_threshold: Some(3.0),
            ..Default::default()
        });
        assert_eq!(config.observer_threshold, 1.0);
    }
}
