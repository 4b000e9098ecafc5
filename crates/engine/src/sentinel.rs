//! Infinite-scroll trigger
//!
//! The sentinel is the last rendered row. When it comes within
//! [`DEFAULT_ROOT_MARGIN`] pixels of the visible area and the list has
//! another page, the next page is requested. The observation is re-bound
//! whenever the last row changes, and a binding never fires twice.

use crate::pagination::PagedList;

/// Distance in pixels outside the viewport that still counts as visible
pub const DEFAULT_ROOT_MARGIN: f64 = 100.0;

/// Vertical extent of an element or of the scroll viewport
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub top: f64,
    pub bottom: f64,
}

impl Bounds {
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    /// Check whether `self` intersects `viewport` grown by `margin` on both edges
    pub fn is_within_margin(&self, viewport: &Bounds, margin: f64) -> bool {
        self.bottom >= viewport.top - margin && self.top <= viewport.bottom + margin
    }
}

/// Observation of the list's last row
#[derive(Debug, Clone, PartialEq)]
pub struct Sentinel {
    margin: f64,
    target: Option<usize>,
    generation: u64,
    fired: bool,
}

impl Sentinel {
    pub fn new(margin: f64) -> Self {
        Self {
            margin,
            target: None,
            generation: 0,
            fired: false,
        }
    }

    /// Row currently observed
    pub fn target(&self) -> Option<usize> {
        self.target
    }

    /// Re-bind to the list's current last row.
    ///
    /// Returns `true` when the observed row changed.
    pub fn bind(&mut self, list: &PagedList) -> bool {
        let target = list.last_index();
        if target == self.target && list.generation() == self.generation {
            return false;
        }
        self.target = target;
        self.generation = list.generation();
        self.fired = false;
        true
    }

    /// Report the observed row's position.
    ///
    /// Returns `true` exactly once per binding, when the row is near the
    /// viewport and another page may be requested.
    pub fn observe(&mut self, row: usize, bounds: &Bounds, viewport: &Bounds, list: &PagedList) -> bool {
        self.bind(list);
        if self.fired || self.target != Some(row) {
            return false;
        }
        if !list.can_load_more() || !bounds.is_within_margin(viewport, self.margin) {
            return false;
        }
        self.fired = true;
        tracing::debug!("Sentinel row {} visible, requesting next page", row);
        true
    }
}

impl Default for Sentinel {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT_MARGIN)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::Page;
    use community_core::Record;

    fn list_with(count: u64, page_size: u32) -> PagedList {
        let mut list = PagedList::new(page_size);
        let req = list.start().unwrap();
        let items = (1..=count).map(|id| Record::new().with_id(id)).collect();
        list.apply(&req, Ok(Page::from_response(items, 1, page_size, None)));
        list
    }

    const VIEWPORT: Bounds = Bounds {
        top: 0.0,
        bottom: 500.0,
    };

    #[test]
    fn test_margin() {
        assert!(Bounds::new(550.0, 580.0).is_within_margin(&VIEWPORT, 100.0));
        assert!(!Bounds::new(601.0, 630.0).is_within_margin(&VIEWPORT, 100.0));
        assert!(Bounds::new(-130.0, -90.0).is_within_margin(&VIEWPORT, 100.0));
    }

    #[test]
    fn test_fires_once_for_visible_last_row() {
        let list = list_with(10, 10);
        let mut sentinel = Sentinel::default();

        let near = Bounds::new(520.0, 560.0);
        assert!(!sentinel.observe(3, &near, &VIEWPORT, &list), "not the last row");
        assert!(sentinel.observe(9, &near, &VIEWPORT, &list));
        assert!(!sentinel.observe(9, &near, &VIEWPORT, &list));
    }

    #[test]
    fn test_far_row_does_not_fire() {
        let list = list_with(10, 10);
        let mut sentinel = Sentinel::default();
        assert!(!sentinel.observe(9, &Bounds::new(900.0, 940.0), &VIEWPORT, &list));
    }

    #[test]
    fn test_no_next_page_does_not_fire() {
        let list = list_with(4, 10);
        let mut sentinel = Sentinel::default();
        assert!(!sentinel.observe(3, &Bounds::new(10.0, 40.0), &VIEWPORT, &list));
    }

    #[test]
    fn test_rebinds_after_append() {
        let mut list = list_with(10, 10);
        let mut sentinel = Sentinel::default();
        let near = Bounds::new(450.0, 490.0);
        assert!(sentinel.observe(9, &near, &VIEWPORT, &list));

        let req = list.load_more().unwrap();
        assert!(!sentinel.observe(9, &near, &VIEWPORT, &list), "fetch in flight");

        let items = (11..=20).map(|id| Record::new().with_id(id)).collect();
        list.apply(&req, Ok(Page::from_response(items, 2, 10, None)));
        assert!(sentinel.bind(&list));
        assert_eq!(sentinel.target(), Some(19));
        assert!(sentinel.observe(19, &near, &VIEWPORT, &list));
    }
}
