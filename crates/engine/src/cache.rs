//! Session-wide query cache
//!
//! The cache is created once by whoever owns the session (the desktop shell
//! or the headless [`Session`](crate::session::Session)) and handed to the
//! list and form. Mutations never patch cached pages; they invalidate the
//! whole list instead.

use std::collections::HashMap;

use crate::pagination::{DEFAULT_PAGE_SIZE, PagedList};

/// Logical key of a cached query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// The community list shown in the table
    Communities,
}

impl QueryKey {
    /// Name used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryKey::Communities => "communities list",
        }
    }
}

impl std::fmt::Display for QueryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Cached paginated lists keyed by query
#[derive(Debug, Clone, PartialEq)]
pub struct QueryCache {
    page_size: u32,
    lists: HashMap<QueryKey, PagedList>,
}

impl QueryCache {
    /// Create an empty cache whose lists use the given page size
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size,
            lists: HashMap::new(),
        }
    }

    /// Page size for lists created by this cache
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Cached list, if it was ever touched
    pub fn list(&self, key: QueryKey) -> Option<&PagedList> {
        self.lists.get(&key)
    }

    /// Cached list, created idle on first access
    pub fn list_mut(&mut self, key: QueryKey) -> &mut PagedList {
        let page_size = self.page_size;
        self.lists
            .entry(key)
            .or_insert_with(|| PagedList::new(page_size))
    }

    /// Discard every page of a list so it refetches from page 1
    pub fn invalidate(&mut self, key: QueryKey) {
        tracing::debug!("Invalidating {}", key);
        self.list_mut(key).invalidate();
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::{ListStatus, Page};
    use community_core::Record;

    #[test]
    fn test_list_created_on_demand() {
        let mut cache = QueryCache::new(5);
        assert!(cache.list(QueryKey::Communities).is_none());

        let list = cache.list_mut(QueryKey::Communities);
        assert_eq!(list.page_size(), 5);
        assert!(list.needs_start());
        assert!(cache.list(QueryKey::Communities).is_some());
    }

    #[test]
    fn test_invalidate_clears_pages_and_bumps_generation() {
        let mut cache = QueryCache::default();
        let list = cache.list_mut(QueryKey::Communities);
        let req = list.start().unwrap();
        list.apply(
            &req,
            Ok(Page::from_response(vec![Record::new().with_id(1)], 1, 10, None)),
        );

        cache.invalidate(QueryKey::Communities);

        let list = cache.list(QueryKey::Communities).unwrap();
        assert!(list.is_empty());
        assert_eq!(list.status(), &ListStatus::Idle);
        assert_eq!(list.generation(), 1);
    }

    #[test]
    fn test_key_display() {
        assert_eq!(QueryKey::Communities.to_string(), "communities list");
    }
}
