//! Cached record list
//!
//! The list itself lives in the `Signal<QueryCache>` provided by the shell.
//! Fetches run as Dioxus tasks and hand their result back to the cache,
//! which drops responses from an older generation.

use community_engine::api::fetch_page;
use community_engine::{PageQuery, PageRequest, PagedList, QueryCache, QueryKey};
use dioxus::prelude::*;

use crate::state::ApiHandle;

const KEY: QueryKey = QueryKey::Communities;

/// Handle to the cached community list
#[derive(Clone, Copy, PartialEq)]
pub struct RecordList {
    cache: Signal<QueryCache>,
    api: CopyValue<ApiHandle>,
}

/// Access the cached list and the API from context
pub fn use_record_list() -> RecordList {
    let cache = use_context::<Signal<QueryCache>>();
    let api = use_context::<ApiHandle>();
    let api = use_hook(|| CopyValue::new(api));
    RecordList { cache, api }
}

/// Fetch page 1 whenever the list is idle (first mount or after invalidation)
pub fn use_list_autostart(list: RecordList) {
    use_effect(move || list.start_if_idle());
}

impl RecordList {
    /// The shared cache signal
    pub fn cache(&self) -> Signal<QueryCache> {
        self.cache
    }

    /// The API handle
    pub fn api(&self) -> ApiHandle {
        self.api.read().clone()
    }

    fn start_if_idle(&self) {
        let idle = self.cache.read().list(KEY).is_none_or(PagedList::needs_start);
        if !idle {
            return;
        }
        let mut cache = self.cache;
        let request = cache.write().list_mut(KEY).start();
        if let Some(request) = request {
            self.fetch(request);
        }
    }

    /// Request the next page if one exists and nothing is in flight
    pub fn load_more(&self) {
        let mut cache = self.cache;
        let request = cache.write().list_mut(KEY).load_more();
        if let Some(request) = request {
            self.fetch(request);
        }
    }

    /// Drop every cached page; the autostart effect refetches page 1
    pub fn invalidate(&self) {
        let mut cache = self.cache;
        cache.write().invalidate(KEY);
    }

    /// Run `f` against the current list without subscribing
    pub fn peek<R>(&self, f: impl FnOnce(Option<&PagedList>) -> R) -> R {
        f(self.cache.peek().list(KEY))
    }

    fn fetch(&self, request: PageRequest) {
        let api = self.api();
        let mut cache = self.cache;
        spawn(async move {
            let result = fetch_page(&*api, &PageQuery::from(&request)).await;
            cache.write().list_mut(KEY).apply(&request, result);
        });
    }
}
