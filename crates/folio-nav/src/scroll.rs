//! Scroll tracking
//!
//! Click-to-navigate, scroll-driven navbar chrome, and visibility-driven
//! active-link highlighting over the section observer.

use folio_dom::observer::{RootMargin, SectionObserver};
use folio_dom::{Document, NodeId, ScrollBehavior};

use crate::config::NavConfig;
use crate::schedule::{Scheduler, TaskId, TaskKind};
use crate::state::NavigationState;
use crate::throttle::Throttle;

/// Class on the navbar once the page is scrolled past the threshold
pub const SCROLLED_CLASS: &str = "scrolled";
/// Scroll offset beyond which the navbar counts as scrolled
pub const SCROLLED_THRESHOLD_PX: f64 = 50.0;
/// Settle window after a programmatic scroll; the animating flag is
/// cleared on expiry rather than on actual animation completion
pub const SETTLE_MS: u64 = 1000;
/// Delay before the initial URL-fragment scroll, letting layout settle
pub const HASH_SCROLL_DELAY_MS: u64 = 100;

/// Fraction of the viewport excluded from the bottom of the observer root
const OBSERVER_BOTTOM_FRACTION: f64 = 0.5;

/// Tracks scroll position and section visibility, keeping the navbar
/// chrome and the active link current
#[derive(Debug)]
pub struct ScrollTracker {
    navbar: NodeId,
    links: Vec<NodeId>,
    sections: Vec<NodeId>,
    observer: SectionObserver,
    throttle: Throttle,
    active_class: String,
    scroll_offset: f64,
    behavior: ScrollBehavior,
    settle_task: Option<TaskId>,
    pending_hash_scroll: Option<NodeId>,
}

impl ScrollTracker {
    /// Create a tracker observing every section
    pub fn new(navbar: NodeId, links: Vec<NodeId>, sections: Vec<NodeId>, config: &NavConfig) -> Self {
        let margin = RootMargin {
            top_px: config.navbar_height,
            bottom_fraction: OBSERVER_BOTTOM_FRACTION,
        };
        let mut observer = SectionObserver::new(margin, config.observer_threshold);
        for &section in &sections {
            observer.observe(section);
        }
        Self {
            navbar,
            links,
            sections,
            observer,
            throttle: Throttle::new(config.throttle_ms),
            active_class: config.active_class.clone(),
            scroll_offset: config.scroll_offset,
            behavior: config.scroll_behavior,
            settle_task: None,
            pending_hash_scroll: None,
        }
    }

    /// The tracked nav links
    pub fn links(&self) -> &[NodeId] {
        &self.links
    }

    /// The tracked sections
    pub fn sections(&self) -> &[NodeId] {
        &self.sections
    }

    /// Fragment a link points at, from its `href`
    pub fn link_fragment(&self, doc: &Document, link: NodeId) -> Option<String> {
        let href = doc.element(link).attribute("href")?;
        let fragment = href.strip_prefix('#')?;
        if fragment.is_empty() {
            return None;
        }
        Some(fragment.to_string())
    }

    /// Link whose `href` targets the given fragment
    pub fn link_for_fragment(&self, doc: &Document, fragment: &str) -> Option<NodeId> {
        self.links
            .iter()
            .copied()
            .find(|&link| self.link_fragment(doc, link).as_deref() == Some(fragment))
    }

    /// Mark exactly one link active: clears the active class and
    /// `aria-current` everywhere, then applies both to `link`
    pub fn set_active_link(&self, doc: &mut Document, link: NodeId) {
        for &l in &self.links {
            let el = doc.element_mut(l);
            el.classes.remove(&self.active_class);
            el.remove_attribute("aria-current");
        }
        let el = doc.element_mut(link);
        el.classes.add(&self.active_class);
        el.set_attribute("aria-current", "page");
    }

    /// Navigate to the section a link targets. Marks the link active
    /// optimistically; returns false (after a warning) when the target
    /// cannot be resolved.
    pub fn navigate(
        &mut self,
        doc: &mut Document,
        state: &mut NavigationState,
        scheduler: &mut Scheduler,
        link: NodeId,
    ) -> bool {
        let Some(fragment) = self.link_fragment(doc, link) else {
            log::warn!("nav link has no usable fragment");
            return false;
        };
        let Some(section) = doc.get_element_by_id(&fragment) else {
            log::warn!("nav target #{fragment} not found");
            return false;
        };

        self.scroll_to_section(doc, state, scheduler, section);
        self.set_active_link(doc, link);
        state.current_section = Some(fragment);
        true
    }

    /// Issue the programmatic scroll for a section and open the settle
    /// window
    pub fn scroll_to_section(
        &mut self,
        doc: &mut Document,
        state: &mut NavigationState,
        scheduler: &mut Scheduler,
        section: NodeId,
    ) {
        let target = doc.element(section).offset_top() - self.scroll_offset;
        doc.scroll_to(target, self.behavior);
        state.is_animating_scroll = true;

        if let Some(task) = self.settle_task.take() {
            scheduler.cancel(task);
        }
        self.settle_task = Some(scheduler.schedule(SETTLE_MS, TaskKind::ScrollSettle));
    }

    /// Throttled scroll handling: navbar chrome, position bookkeeping,
    /// then observer-driven active-section updates
    pub fn handle_scroll(&mut self, doc: &mut Document, state: &mut NavigationState, now_ms: u64) {
        if !self.throttle.should_run(now_ms) {
            return;
        }

        let y = doc.scroll_y();
        if !state.is_animating_scroll {
            let scrolled = y > SCROLLED_THRESHOLD_PX;
            doc.element_mut(self.navbar).classes.set(SCROLLED_CLASS, scrolled);
        }
        state.last_scroll_y = y;

        self.update_active_section(doc, state);
    }

    /// Poll the observer and process crossings in delivery order; the
    /// last qualifying entry wins when several intersect at once
    pub fn update_active_section(&mut self, doc: &mut Document, state: &mut NavigationState) {
        let entries = self.observer.poll(doc);
        for entry in entries {
            if !entry.is_intersecting || state.is_animating_scroll {
                continue;
            }
            let Some(id) = doc.element(entry.target).id.clone() else {
                continue;
            };
            if state.current_section.as_deref() == Some(id.as_str()) {
                continue;
            }
            if let Some(link) = self.link_for_fragment(doc, &id) {
                self.set_active_link(doc, link);
                state.current_section = Some(id);
            }
        }
    }

    /// Initial link selection: a URL fragment matching both a section
    /// and a link activates that link and defers a scroll to it;
    /// otherwise the first link becomes active with no scroll
    pub fn select_initial(
        &mut self,
        doc: &mut Document,
        state: &mut NavigationState,
        scheduler: &mut Scheduler,
    ) {
        if let Some(fragment) = doc.fragment().map(str::to_string) {
            let section = doc.get_element_by_id(&fragment);
            let link = self.link_for_fragment(doc, &fragment);
            if let (Some(section), Some(link)) = (section, link) {
                self.set_active_link(doc, link);
                state.current_section = Some(fragment);
                self.pending_hash_scroll = Some(section);
                scheduler.schedule(HASH_SCROLL_DELAY_MS, TaskKind::InitialHashScroll);
                return;
            }
        }

        if let Some(&first) = self.links.first() {
            self.set_active_link(doc, first);
            state.current_section = self.link_fragment(doc, first);
        }
    }

    /// The deferred initial scroll came due
    pub fn run_pending_hash_scroll(
        &mut self,
        doc: &mut Document,
        state: &mut NavigationState,
        scheduler: &mut Scheduler,
    ) {
        if let Some(section) = self.pending_hash_scroll.take() {
            self.scroll_to_section(doc, state, scheduler, section);
        }
    }

    /// The settle window elapsed; programmatic scrolling is over
    pub fn settle(&mut self, state: &mut NavigationState) {
        state.is_animating_scroll = false;
        self.settle_task = None;
    }

    /// Stop visibility observation
    pub fn disconnect(&mut self) {
        self.observer.disconnect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_dom::Rect;

    fn page() -> (Document, ScrollTracker) {
        let mut doc = Document::new(1000.0, 800.0);
        let body = doc.body();

        let navbar = doc.create_element("nav");
        doc.element_mut(navbar).classes.add("navbar");
        doc.append_child(body, navbar);

        let mut links = Vec::new();
        let mut sections = Vec::new();
        for (i, id) in ["about", "projects", "contact"].iter().enumerate() {
            let link = doc.create_element("a");
            {
                let el = doc.element_mut(link);
                el.classes.add("nav-link");
                el.set_attribute("href", &format!("#{id}"));
            }
            doc.append_child(navbar, link);
            links.push(link);

            let section = doc.create_element("section");
            {
                let el = doc.element_mut(section);
                el.set_id(id);
                el.rect = Rect::from_xywh(0.0, 600.0 * i as f64, 1000.0, 600.0);
            }
            doc.append_child(body, section);
            sections.push(section);
        }

        let tracker = ScrollTracker::new(navbar, links, sections, &NavConfig::default());
        (doc, tracker)
    }

    #[test]
    fn test_set_active_link_is_exclusive() {
        let (mut doc, tracker) = page();
        let links: Vec<NodeId> = tracker.links().to_vec();

        tracker.set_active_link(&mut doc, links[1]);
        tracker.set_active_link(&mut doc, links[2]);

        let active: Vec<NodeId> = links
            .iter()
            .copied()
            .filter(|&l| doc.element(l).classes.contains("active"))
            .collect();
        assert_eq!(active, vec![links[2]]);
        assert_eq!(doc.element(links[2]).attribute("aria-current"), Some("page"));
        assert_eq!(doc.element(links[1]).attribute("aria-current"), None);
    }

    #[test]
    fn test_navigate_scrolls_with_offset() {
        let (mut doc, mut tracker) = page();
        let mut state = NavigationState::default();
        let mut scheduler = Scheduler::new();
        let link = tracker.links()[1];

        assert!(tracker.navigate(&mut doc, &mut state, &mut scheduler, link));

        // projects sits at y=600; default offset is 80.
        let request = doc.scroll_requests().last().copied().unwrap();
        assert_eq!(request.y, 520.0);
        assert!(state.is_animating_scroll);
        assert_eq!(state.current_section.as_deref(), Some("projects"));
        assert!(doc.element(link).classes.contains("active"));

        for kind in scheduler.advance(SETTLE_MS) {
            assert_eq!(kind, TaskKind::ScrollSettle);
            tracker.settle(&mut state);
        }
        assert!(!state.is_animating_scroll);
    }

    #[test]
    fn test_navigate_missing_target_aborts() {
        let (mut doc, mut tracker) = page();
        let mut state = NavigationState::default();
        let mut scheduler = Scheduler::new();
        let link = tracker.links()[0];
        doc.element_mut(link).set_attribute("href", "#nowhere");

        assert!(!tracker.navigate(&mut doc, &mut state, &mut scheduler, link));
        assert!(doc.scroll_requests().is_empty());
        assert!(!state.is_animating_scroll);
    }

    #[test]
    fn test_scroll_chrome_threshold() {
        let (mut doc, mut tracker) = page();
        let mut state = NavigationState::default();
        let navbar = doc.query_selector(".navbar").unwrap();

        doc.set_scroll_y(51.0);
        tracker.handle_scroll(&mut doc, &mut state, 0);
        assert!(doc.element(navbar).classes.contains(SCROLLED_CLASS));
        assert_eq!(state.last_scroll_y, 51.0);

        doc.set_scroll_y(50.0);
        tracker.handle_scroll(&mut doc, &mut state, 16);
        assert!(!doc.element(navbar).classes.contains(SCROLLED_CLASS));
    }

    #[test]
    fn test_scroll_events_are_throttled() {
        let (mut doc, mut tracker) = page();
        let mut state = NavigationState::default();

        doc.set_scroll_y(100.0);
        tracker.handle_scroll(&mut doc, &mut state, 0);
        doc.set_scroll_y(200.0);
        // Within the 16 ms window: dropped, not queued.
        tracker.handle_scroll(&mut doc, &mut state, 3);
        assert_eq!(state.last_scroll_y, 100.0);
    }

    #[test]
    fn test_visibility_updates_active_link() {
        let (mut doc, mut tracker) = page();
        let mut state = NavigationState::default();

        // Establish baseline at the top of the page.
        tracker.update_active_section(&mut doc, &mut state);
        assert_eq!(state.current_section.as_deref(), Some("about"));

        // Scroll until projects fills the observer root.
        doc.set_scroll_y(600.0);
        tracker.update_active_section(&mut doc, &mut state);
        assert_eq!(state.current_section.as_deref(), Some("projects"));
        let projects_link = tracker.links()[1];
        assert!(doc.element(projects_link).classes.contains("active"));
    }

    #[test]
    fn test_visibility_ignored_while_animating() {
        let (mut doc, mut tracker) = page();
        let mut state = NavigationState::default();
        tracker.update_active_section(&mut doc, &mut state);

        state.is_animating_scroll = true;
        state.current_section = Some("contact".into());
        doc.set_scroll_y(600.0);
        tracker.update_active_section(&mut doc, &mut state);
        // The crossing of projects is dropped, not deferred.
        assert_eq!(state.current_section.as_deref(), Some("contact"));
    }

    #[test]
    fn test_select_initial_without_fragment() {
        let (mut doc, mut tracker) = page();
        let mut state = NavigationState::default();
        let mut scheduler = Scheduler::new();

        tracker.select_initial(&mut doc, &mut state, &mut scheduler);

        assert_eq!(state.current_section.as_deref(), Some("about"));
        assert!(doc.element(tracker.links()[0]).classes.contains("active"));
        assert!(doc.scroll_requests().is_empty());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_select_initial_with_fragment() {
        let (mut doc, mut tracker) = page();
        let mut state = NavigationState::default();
        let mut scheduler = Scheduler::new();
        doc.set_fragment("projects");

        tracker.select_initial(&mut doc, &mut state, &mut scheduler);

        // Link active immediately, scroll deferred.
        assert!(doc.element(tracker.links()[1]).classes.contains("active"));
        assert!(doc.scroll_requests().is_empty());

        for kind in scheduler.advance(HASH_SCROLL_DELAY_MS) {
            assert_eq!(kind, TaskKind::InitialHashScroll);
            tracker.run_pending_hash_scroll(&mut doc, &mut state, &mut scheduler);
        }
        let request = doc.scroll_requests().last().copied().unwrap();
        assert_eq!(request.y, 520.0);
    }

    #[test]
    fn test_select_initial_with_unmatched_fragment() {
        let (mut doc, mut tracker) = page();
        let mut state = NavigationState::default();
        let mut scheduler = Scheduler::new();
        doc.set_fragment("unknown");

        tracker.select_initial(&mut doc, &mut state, &mut scheduler);

        // Falls back to the first link, no deferred scroll.
        assert_eq!(state.current_section.as_deref(), Some("about"));
        assert_eq!(scheduler.pending(), 0);
    }
}
