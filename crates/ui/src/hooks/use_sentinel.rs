//! Last-row sentinel
//!
//! Tracks the mounted element of the list's last row and the scroll
//! container. Whenever either one mounts, and on every scroll, both client
//! rects are measured and fed to [`Sentinel::observe`].

use std::rc::Rc;

use community_engine::{Bounds, Sentinel};
use dioxus::prelude::*;

use super::use_record_list::RecordList;

// ============================================================================
// Measured Elements
// ============================================================================

/// The last row and its container, in whatever order they mount
#[derive(Debug, Clone, PartialEq)]
pub struct Targets<E> {
    last_row: Option<(usize, E)>,
    viewport: Option<E>,
}

impl<E> Default for Targets<E> {
    fn default() -> Self {
        Self {
            last_row: None,
            viewport: None,
        }
    }
}

impl<E: Clone> Targets<E> {
    /// Store the container; returns the pair to measure once both are known
    pub fn set_viewport(&mut self, element: E) -> Option<(usize, E, E)> {
        self.viewport = Some(element);
        self.pair()
    }

    /// Store a mounted row if it is the last one; returns the pair to measure
    pub fn set_row(&mut self, row: usize, last: Option<usize>, element: E) -> Option<(usize, E, E)> {
        if last != Some(row) {
            return None;
        }
        self.last_row = Some((row, element));
        self.pair()
    }

    /// Row index, row element and container, if both are mounted
    pub fn pair(&self) -> Option<(usize, E, E)> {
        let (row, element) = self.last_row.clone()?;
        let viewport = self.viewport.clone()?;
        Some((row, element, viewport))
    }
}

// ============================================================================
// Hook
// ============================================================================

/// Infinite-scroll trigger bound to a record list
#[derive(Clone, Copy, PartialEq)]
pub struct SentinelHandle {
    list: RecordList,
    sentinel: Signal<Sentinel>,
    targets: Signal<Targets<Rc<MountedData>>>,
}

pub fn use_sentinel(list: RecordList) -> SentinelHandle {
    SentinelHandle {
        list,
        sentinel: use_signal(Sentinel::default),
        targets: use_signal(Targets::default),
    }
}

impl SentinelHandle {
    /// Remember the scroll container and check a last row mounted before it
    pub fn mount_viewport(&self, element: Rc<MountedData>) {
        let mut targets = self.targets;
        let pair = targets.write().set_viewport(element);
        if let Some(pair) = pair {
            self.measure(pair);
        }
    }

    /// A row was mounted; keep it if it is the last one and check it
    pub fn mount_row(&self, row: usize, last: Option<usize>, element: Rc<MountedData>) {
        let mut targets = self.targets;
        let pair = targets.write().set_row(row, last, element);
        if let Some(pair) = pair {
            self.measure(pair);
        }
    }

    /// Measure the last row against the container
    pub fn check(&self) {
        let pair = self.targets.peek().pair();
        if let Some(pair) = pair {
            self.measure(pair);
        }
    }

    fn measure(&self, (row, element, container): (usize, Rc<MountedData>, Rc<MountedData>)) {
        let list = self.list;
        let mut sentinel = self.sentinel;

        spawn(async move {
            let (Ok(rect), Ok(view)) = (
                element.get_client_rect().await,
                container.get_client_rect().await,
            ) else {
                return;
            };
            let bounds = Bounds::new(rect.min_y(), rect.max_y());
            let viewport = Bounds::new(view.min_y(), view.max_y());

            let fire = list.peek(|paged| {
                paged.is_some_and(|paged| sentinel.write().observe(row, &bounds, &viewport, paged))
            });
            if fire {
                list.load_more();
            }
        });
    }
}

// ============================================================================
// Tests
// ============================================================================
