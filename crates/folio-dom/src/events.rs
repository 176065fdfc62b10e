//! Input events
//!
//! The event vocabulary the host pumps into the controller, keyboard
//! modifier state, and the listener registry used to make bindings
//! (and their removal on teardown) observable.

use std::collections::HashMap;

use crate::NodeId;

/// Keyboard key, reduced to what navigation handles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Space,
    Char(char),
}

/// Keyboard modifier state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyModifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl KeyModifiers {
    /// No modifiers held
    pub const NONE: KeyModifiers =
        KeyModifiers { shift: false, ctrl: false, alt: false, meta: false };

    pub fn from_flags(shift: bool, ctrl: bool, alt: bool, meta: bool) -> Self {
        Self { shift, ctrl, alt, meta }
    }
}

/// An input event delivered by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Click { target: NodeId },
    Scroll { y: f64 },
    Resize { width: f64, height: f64 },
    KeyDown { key: Key, modifiers: KeyModifiers },
}

/// Listener target: the document itself or a specific element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerTarget {
    Document,
    Element(NodeId),
}

/// Registered event listeners by target
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    listeners: HashMap<ListenerTarget, Vec<String>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for an event type
    pub fn bind(&mut self, target: ListenerTarget, event_type: &str) {
        self.listeners
            .entry(target)
            .or_default()
            .push(event_type.to_string());
    }

    /// Remove one listener registration for an event type
    pub fn unbind(&mut self, target: ListenerTarget, event_type: &str) {
        if let Some(types) = self.listeners.get_mut(&target) {
            if let Some(pos) = types.iter().position(|t| t == event_type) {
                types.remove(pos);
            }
            if types.is_empty() {
                self.listeners.remove(&target);
            }
        }
    }

    /// Check whether a listener is registered
    pub fn is_bound(&self, target: ListenerTarget, event_type: &str) -> bool {
        self.listeners
            .get(&target)
            .is_some_and(|types| types.iter().any(|t| t == event_type))
    }

    /// Total number of registrations
    pub fn len(&self) -> usize {
        self.listeners.values().map(|v| v.len()).sum()
    }

    /// True when nothing is registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
