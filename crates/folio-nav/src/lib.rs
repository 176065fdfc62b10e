//! folio nav - Portfolio page-navigation controller
//!
//! Highlights the current section while the user scrolls, smooth-scrolls
//! to sections on link activation, toggles a persisted light/dark theme,
//! and manages a collapsible mobile menu. Operates on the headless page
//! model from `folio-dom`; the host pumps input events in and advances
//! the controller's logical clock.

/// Effective configuration and caller overrides
pub mod config;
/// The navigation controller and its bootstrap sequence
pub mod controller;
/// Fatal initialization errors
pub mod error;
/// Mobile menu open/close management
pub mod menu;
/// Cancellable deferred tasks over the logical clock
pub mod schedule;
/// Scroll tracking and active-link highlighting
pub mod scroll;
/// Mutable navigation state
pub mod state;
/// Theme toggling and persistence
pub mod theme;
/// Rate limiting for high-frequency events
pub mod throttle;

pub use config::{NavConfig, NavOverrides};
pub use controller::{bootstrap, NavigationController};
pub use error::NavError;
pub use state::NavigationState;
pub use theme::Theme;
