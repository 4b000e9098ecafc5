//! Paginated record list
//!
//! [`PagedList`] is the state machine behind the infinite-scroll table:
//!
//! ```text
//! idle ──start──▶ loading-first-page ──ok──▶ ready ◀──ok── loading-next-page
//!                        │                     │ load_more        ▲
//!                        └──err──▶ error ◀─err─┴──────────────────┘
//! ```
//!
//! Every request carries the list generation it was issued for. An
//! invalidation bumps the generation, so responses that arrive afterwards
//! are recognized as stale and dropped.

use community_core::{AdminResult, Record, RecordId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Default number of records per page
pub const DEFAULT_PAGE_SIZE: u32 = 10;

// ============================================================================
// Page
// ============================================================================

/// One fetched batch of records plus continuation info
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Records in server order
    pub items: Vec<Record>,
    /// 1-based page number
    pub page_number: u32,
    /// Requested page size
    pub page_size: u32,
    /// Next page to request, if any
    pub next_page: Option<u32>,
    /// Total record count reported by the server
    pub total_count: Option<u64>,
}

impl Page {
    /// Build a page from a list response, deriving the continuation
    pub fn from_response(
        items: Vec<Record>,
        page_number: u32,
        page_size: u32,
        total_count: Option<u64>,
    ) -> Self {
        let next_page = has_next_page(page_number, page_size, items.len(), total_count)
            .then(|| page_number + 1);
        Self {
            items,
            page_number,
            page_size,
            next_page,
            total_count,
        }
    }

    /// Number of records on the page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the page holds no records
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Decide whether another page exists.
///
/// With a total count: `page * limit < total`. Without one: a full page
/// implies there may be more.
pub fn has_next_page(page: u32, limit: u32, returned: usize, total_count: Option<u64>) -> bool {
    match total_count {
        Some(total) => u64::from(page) * u64::from(limit) < total,
        None => limit > 0 && returned == limit as usize,
    }
}

// ============================================================================
// Requests and Status
// ============================================================================

/// A page fetch issued by the list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// List generation at issue time
    pub generation: u64,
    /// 1-based page number
    pub page: u32,
    /// Page size
    pub limit: u32,
}

/// Lifecycle of a paginated list
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListStatus {
    /// Nothing requested yet (or reset by invalidation)
    #[default]
    Idle,
    /// Page 1 in flight
    LoadingFirstPage,
    /// At least page 1 loaded, nothing in flight
    Ready,
    /// A follow-up page in flight
    LoadingNextPage,
    /// A fetch failed; terminal until the list is reset
    Error(String),
}

impl ListStatus {
    /// Whether a request is in flight
    pub fn is_fetching(&self) -> bool {
        matches!(self, ListStatus::LoadingFirstPage | ListStatus::LoadingNextPage)
    }

    /// Short label for logs and the status line
    pub fn label(&self) -> &'static str {
        match self {
            ListStatus::Idle => "idle",
            ListStatus::LoadingFirstPage => "loading-first-page",
            ListStatus::Ready => "ready",
            ListStatus::LoadingNextPage => "loading-next-page",
            ListStatus::Error(_) => "error",
        }
    }
}

/// What happened to a page response handed to [`PagedList::apply`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Page appended
    Appended,
    /// Fetch failed; list moved to the error state
    Failed,
    /// Response belongs to an older generation and was dropped
    Stale,
}

// ============================================================================
// PagedList
// ============================================================================

/// Growing list of fetched pages
#[derive(Debug, Clone, PartialEq)]
pub struct PagedList {
    page_size: u32,
    generation: u64,
    status: ListStatus,
    pages: Vec<Page>,
    pending: Option<PageRequest>,
}

impl PagedList {
    /// Create an idle list
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size: page_size.max(1),
            generation: 0,
            status: ListStatus::Idle,
            pages: Vec::new(),
            pending: None,
        }
    }

    /// Page size used for every request
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Current generation
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Current status
    pub fn status(&self) -> &ListStatus {
        &self.status
    }

    /// Loaded pages in request order
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// All loaded records, pages concatenated in request order
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.pages.iter().flat_map(|page| page.items.iter())
    }

    /// Number of loaded records
    pub fn len(&self) -> usize {
        self.pages.iter().map(Page::len).sum()
    }

    /// Check if no record is loaded
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index of the last loaded record
    pub fn last_index(&self) -> Option<usize> {
        self.len().checked_sub(1)
    }

    /// Continuation from the most recent page
    pub fn next_page(&self) -> Option<u32> {
        self.pages.last().and_then(|page| page.next_page)
    }

    /// Whether a follow-up page is known to exist
    pub fn has_next_page(&self) -> bool {
        self.next_page().is_some()
    }

    /// Whether a request is in flight
    pub fn is_fetching(&self) -> bool {
        self.status.is_fetching()
    }

    /// Whether [`PagedList::load_more`] would issue a request
    pub fn can_load_more(&self) -> bool {
        self.status == ListStatus::Ready && self.has_next_page()
    }

    /// Whether the list is waiting for its first fetch
    pub fn needs_start(&self) -> bool {
        self.status == ListStatus::Idle
    }

    /// Request page 1 if the list is idle
    pub fn start(&mut self) -> Option<PageRequest> {
        if self.status != ListStatus::Idle {
            return None;
        }
        self.status = ListStatus::LoadingFirstPage;
        Some(self.issue(1))
    }

    /// Request the next page if one exists and nothing is in flight
    pub fn load_more(&mut self) -> Option<PageRequest> {
        if !self.can_load_more() {
            return None;
        }
        let page = self.next_page()?;
        self.status = ListStatus::LoadingNextPage;
        Some(self.issue(page))
    }

    fn issue(&mut self, page: u32) -> PageRequest {
        let request = PageRequest {
            generation: self.generation,
            page,
            limit: self.page_size,
        };
        tracing::debug!(
            "Requesting page {} (limit {}, generation {})",
            page,
            self.page_size,
            self.generation
        );
        self.pending = Some(request);
        request
    }

    /// Apply the result of a request issued by this list
    pub fn apply(&mut self, request: &PageRequest, result: AdminResult<Page>) -> ApplyOutcome {
        if request.generation != self.generation || self.pending != Some(*request) {
            tracing::warn!(
                "Dropping stale response for page {} (generation {}, current {})",
                request.page,
                request.generation,
                self.generation
            );
            return ApplyOutcome::Stale;
        }
        self.pending = None;

        match result {
            Ok(page) => {
                self.warn_duplicates(&page);
                self.pages.push(page);
                self.status = ListStatus::Ready;
                ApplyOutcome::Appended
            }
            Err(err) => {
                tracing::error!("Failed to load page {}: {}", request.page, err);
                self.status = ListStatus::Error(err.to_string());
                ApplyOutcome::Failed
            }
        }
    }

    fn warn_duplicates(&self, page: &Page) {
        let mut seen: HashSet<RecordId> = self.records().filter_map(|r| r.id).collect();
        for id in page.items.iter().filter_map(|r| r.id) {
            if !seen.insert(id) {
                tracing::warn!("Duplicate record id {} in page {}", id, page.page_number);
            }
        }
    }

    /// Drop every page and return to idle so page 1 is fetched again
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.pages.clear();
        self.pending = None;
        self.status = ListStatus::Idle;
    }
}

impl Default for PagedList {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

// ============================================================================
// Tests
// ============================================================================
