//! Section intersection observer
//!
//! Watches observed elements against a root-margin-inset viewport and
//! reports threshold crossings when polled. Entries are produced in
//! observed order.

use std::collections::HashMap;

use crate::{Document, NodeId, Rect};

/// Root margin: insets applied to the viewport before intersection
#[derive(Debug, Clone, Copy, Default)]
pub struct RootMargin {
    /// Pixels excluded from the top of the viewport
    pub top_px: f64,
    /// Fraction of viewport height excluded from the bottom (0-1)
    pub bottom_fraction: f64,
}

/// A threshold crossing for one observed element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub target: NodeId,
    pub is_intersecting: bool,
    pub intersection_ratio: f64,
}

/// Intersection observer over the document viewport
#[derive(Debug)]
pub struct SectionObserver {
    margin: RootMargin,
    threshold: f64,
    observed: Vec<NodeId>,
    previous: HashMap<NodeId, bool>,
    connected: bool,
}

impl SectionObserver {
    /// Create an observer with the given margin and ratio threshold
    pub fn new(margin: RootMargin, threshold: f64) -> Self {
        Self {
            margin,
            threshold: threshold.clamp(0.0, 1.0),
            observed: Vec::new(),
            previous: HashMap::new(),
            connected: true,
        }
    }

    /// Start observing an element
    pub fn observe(&mut self, target: NodeId) {
        if !self.observed.contains(&target) {
            self.observed.push(target);
        }
    }

    /// Stop observing an element
    pub fn unobserve(&mut self, target: NodeId) {
        self.observed.retain(|&t| t != target);
        self.previous.remove(&target);
    }

    /// Stop observing everything; subsequent polls yield nothing
    pub fn disconnect(&mut self) {
        self.observed.clear();
        self.previous.clear();
        self.connected = false;
    }

    /// Number of observed elements
    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    /// Recompute intersections and return crossings since the last
    /// poll. The first poll reports every observed element.
    pub fn poll(&mut self, doc: &Document) -> Vec<IntersectionEntry> {
        if !self.connected {
            return Vec::new();
        }

        let root = self.root_rect(doc);
        let mut entries = Vec::new();
        for &target in &self.observed {
            let rect = doc.element(target).rect.offset_y(-doc.scroll_y());
            let ratio = intersection_ratio(&rect, &root);
            let intersecting = ratio >= self.threshold;

            let changed = self.previous.get(&target) != Some(&intersecting);
            self.previous.insert(target, intersecting);
            if changed {
                entries.push(IntersectionEntry {
                    target,
                    is_intersecting: intersecting,
                    intersection_ratio: ratio,
                });
            }
        }
        entries
    }

    fn root_rect(&self, doc: &Document) -> Rect {
        let (width, height) = doc.viewport();
        let top = self.margin.top_px;
        let bottom = height * (1.0 - self.margin.bottom_fraction);
        Rect::from_xywh(0.0, top, width, (bottom - top).max(0.0))
    }
}

fn intersection_ratio(rect: &Rect, root: &Rect) -> f64 {
    if rect.area() <= 0.0 {
        return 0.0;
    }
    match rect.intersection(root) {
        Some(overlap) => overlap.area() / rect.area(),
        None => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScrollBehavior;

    fn doc_with_section(y: f64, height: f64) -> (Document, NodeId) {
        let mut doc = Document::new(1000.0, 800.0);
        let section = doc.create_element("section");
        doc.element_mut(section).set_id("about");
        doc.element_mut(section).rect = Rect::from_xywh(0.0, y, 1000.0, height);
        let body = doc.body();
        doc.append_child(body, section);
        (doc, section)
    }

    #[test]
    fn test_first_poll_reports_all() {
        let (doc, section) = doc_with_section(100.0, 200.0);
        let mut observer =
            SectionObserver::new(RootMargin { top_px: 70.0, bottom_fraction: 0.5 }, 0.4);
        observer.observe(section);

        let entries = observer.poll(&doc);
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_intersecting);
    }

    #[test]
    fn test_crossing_on_scroll() {
        // Section far below the fold: not intersecting initially.
        let (mut doc, section) = doc_with_section(2000.0, 400.0);
        let mut observer =
            SectionObserver::new(RootMargin { top_px: 70.0, bottom_fraction: 0.5 }, 0.4);
        observer.observe(section);

        let entries = observer.poll(&doc);
        assert_eq!(entries.len(), 1);
        assert!(!entries[0].is_intersecting);

        // No change, no entry.
        assert!(observer.poll(&doc).is_empty());

        doc.scroll_to(1950.0, ScrollBehavior::Instant);
        let entries = observer.poll(&doc);
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_intersecting);
        assert!(entries[0].intersection_ratio >= 0.4);
    }

    #[test]
    fn test_disconnect_stops_delivery() {
        let (doc, section) = doc_with_section(100.0, 200.0);
        let mut observer = SectionObserver::new(RootMargin::default(), 0.4);
        observer.observe(section);
        observer.disconnect();

        assert!(observer.poll(&doc).is_empty());
        assert_eq!(observer.observed_count(), 0);
    }
}
