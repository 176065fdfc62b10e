//! folio DOM - Headless page model
//!
//! A minimal document-object-model substrate for the folio navigation
//! engine: an element arena with ids, classes, attributes and rect
//! geometry, viewport and scroll state, an intersection observer, a
//! web-storage emulation, and the input-event vocabulary.

mod classlist;
mod document;
mod geometry;
mod selector;

pub mod events;
pub mod observer;
pub mod storage;

pub use classlist::ClassList;
pub use document::{Document, Element, ScrollBehavior, ScrollRequest};
pub use geometry::Rect;
pub use selector::Selector;

/// Node identifier (index into the document's element arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Arena index of this node
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
