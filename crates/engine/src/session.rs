//! Headless admin session
//!
//! [`Session`] wires the schema, query cache, form and list together without
//! a view layer. The CLI runs on it and the flow tests drive it the way the
//! desktop table does: start, scroll, submit, delete.

use std::sync::Arc;

use community_core::{AdminError, AdminResult, Record, RecordId, Schema, now_timestamp};

use crate::api::{self, CommunityApi, Confirm, PageQuery, delete_prompt};
use crate::cache::{QueryCache, QueryKey};
use crate::form::{FormMode, RecordForm, SubmitStep, submit as send_submission};
use crate::pagination::{PageRequest, PagedList};
use crate::sentinel::{Bounds, Sentinel};

/// What a delete request ended in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user declined; nothing was sent
    Cancelled,
    /// The record was deleted and the list refetched
    Deleted,
}

/// Schema, cache and API of one admin session
pub struct Session<A: CommunityApi + ?Sized> {
    api: Arc<A>,
    schema: Schema,
    cache: QueryCache,
    sentinel: Sentinel,
    search: Option<String>,
}

impl<A: CommunityApi + ?Sized> Session<A> {
    /// Load the schema and create an empty cache
    pub async fn open(api: Arc<A>, page_size: u32) -> AdminResult<Self> {
        let schema = api::load_schema(api.as_ref()).await?;
        Ok(Self {
            api,
            schema,
            cache: QueryCache::new(page_size),
            sentinel: Sentinel::default(),
            search: None,
        })
    }

    /// Filter list requests by a free-text term
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = PageQuery::new(1, 1).with_search(search).search;
        self
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn api(&self) -> &A {
        self.api.as_ref()
    }

    /// The community list, if it was ever fetched
    pub fn list(&self) -> Option<&PagedList> {
        self.cache.list(QueryKey::Communities)
    }

    /// Loaded records in display order
    pub fn records(&self) -> Vec<&Record> {
        self.list()
            .map(|list| list.records().collect())
            .unwrap_or_default()
    }

    async fn run(&mut self, request: PageRequest) -> AdminResult<()> {
        let mut query = PageQuery::from(&request);
        query.search = self.search.clone();

        let result = api::fetch_page(self.api.as_ref(), &query).await;
        let failure = result
            .as_ref()
            .err()
            .map(|err| AdminError::list_fetch(request.page, list_error_message(err)));

        self.cache.list_mut(QueryKey::Communities).apply(&request, result);
        failure.map_or(Ok(()), Err)
    }

    /// Fetch page 1 if the list is idle
    pub async fn refresh(&mut self) -> AdminResult<()> {
        match self.cache.list_mut(QueryKey::Communities).start() {
            Some(request) => self.run(request).await,
            None => Ok(()),
        }
    }

    /// Fetch the next page if there is one; returns whether a page was fetched
    pub async fn load_more(&mut self) -> AdminResult<bool> {
        match self.cache.list_mut(QueryKey::Communities).load_more() {
            Some(request) => self.run(request).await.map(|()| true),
            None => Ok(false),
        }
    }

    /// Fetch pages until the list is exhausted
    pub async fn load_all(&mut self) -> AdminResult<()> {
        self.refresh().await?;
        while self.load_more().await? {}
        Ok(())
    }

    /// Report a rendered row's position; fetches the next page when the
    /// last row comes into view. Returns whether a page was fetched.
    pub async fn row_scrolled(
        &mut self,
        row: usize,
        bounds: Bounds,
        viewport: Bounds,
    ) -> AdminResult<bool> {
        let list = self.cache.list_mut(QueryKey::Communities);
        if !self.sentinel.observe(row, &bounds, &viewport, list) {
            return Ok(false);
        }
        self.load_more().await
    }

    /// Discard every cached page and fetch page 1 again
    pub async fn invalidate(&mut self) -> AdminResult<()> {
        self.cache.invalidate(QueryKey::Communities);
        self.refresh().await
    }

    async fn refetch_after_mutation(&mut self) {
        if let Err(err) = self.invalidate().await {
            tracing::error!("Refetch after mutation failed: {}", err);
        }
    }

    /// Open a form for the current schema
    pub fn form(&self, mode: FormMode) -> RecordForm {
        RecordForm::new(&self.schema, mode)
    }

    /// Validate and send a form.
    ///
    /// Returns `Ok(None)` if a submission was already in flight. On success
    /// the list is invalidated and page 1 refetched.
    pub async fn submit(&mut self, form: &mut RecordForm) -> AdminResult<Option<Record>> {
        let submission = match form.begin_submit(&now_timestamp()) {
            SubmitStep::Busy => return Ok(None),
            SubmitStep::Invalid(errors) => return Err(AdminError::Validation(errors)),
            SubmitStep::Ready(submission) => submission,
        };

        let result = send_submission(self.api.as_ref(), &submission).await;
        form.finish_submit(&result);
        let stored = result?;

        self.refetch_after_mutation().await;
        Ok(Some(stored))
    }

    /// Ask for confirmation, then delete and refetch
    pub async fn delete<C>(&mut self, id: RecordId, confirm: &C) -> AdminResult<DeleteOutcome>
    where
        C: Confirm + ?Sized,
    {
        if !confirm.confirm(&delete_prompt(id)).await {
            tracing::debug!("Delete of #{} cancelled", id);
            return Ok(DeleteOutcome::Cancelled);
        }

        api::delete_record(self.api.as_ref(), id).await?;
        self.refetch_after_mutation().await;
        Ok(DeleteOutcome::Deleted)
    }

    /// Page through the list until a record with the id is loaded
    pub async fn find_record(&mut self, id: RecordId) -> AdminResult<Record> {
        self.refresh().await?;
        loop {
            if let Some(record) = self.records().into_iter().find(|r| r.id == Some(id)) {
                return Ok(record.clone());
            }
            if !self.load_more().await? {
                return Err(AdminError::NotFound(format!("community #{id}")));
            }
        }
    }
}

fn list_error_message(err: &AdminError) -> String {
    match err {
        AdminError::ListFetch { message, .. } => message.clone(),
        other => other.to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::AutoConfirm;
    use crate::pagination::ListStatus;
    use crate::testing::{Call, FakeApi};

    const VIEWPORT: Bounds = Bounds {
        top: 0.0,
        bottom: 600.0,
    };
    const NEAR: Bounds = Bounds {
        top: 620.0,
        bottom: 660.0,
    };

    async fn session(api: FakeApi) -> (Arc<FakeApi>, Session<FakeApi>) {
        let api = Arc::new(api);
        let mut session = Session::open(api.clone(), 10).await.unwrap();
        session.refresh().await.unwrap();
        (api, session)
    }

    fn page_calls(api: &FakeApi) -> Vec<u32> {
        api.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Page(query) => Some(query.page),
                _ => None,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_full_first_page_schedules_second_on_scroll() {
        let (api, mut session) = session(FakeApi::new().with_records(25)).await;
        assert_eq!(session.records().len(), 10);

        assert!(!session.row_scrolled(4, NEAR, VIEWPORT).await.unwrap());
        assert!(session.row_scrolled(9, NEAR, VIEWPORT).await.unwrap());
        assert_eq!(page_calls(&api), vec![1, 2]);
        assert_eq!(session.records().len(), 20);
    }

    #[tokio::test]
    async fn test_short_first_page_stops() {
        let (api, mut session) = session(FakeApi::new().with_records(4)).await;

        assert!(!session.row_scrolled(3, NEAR, VIEWPORT).await.unwrap());
        assert!(!session.load_more().await.unwrap());
        assert_eq!(page_calls(&api), vec![1]);
    }

    #[tokio::test]
    async fn test_total_count_ends_pagination() {
        let (api, mut session) = session(FakeApi::new().with_records(20).reporting_total()).await;
        session.load_all().await.unwrap();

        assert_eq!(page_calls(&api), vec![1, 2]);
        assert_eq!(session.records().len(), 20);
    }

    #[tokio::test]
    async fn test_confirmed_delete_refetches_first_page() {
        let (api, mut session) = session(FakeApi::new().with_records(3)).await;
        api.clear_calls();

        let outcome = session.delete(1, &AutoConfirm(true)).await.unwrap();
        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert_eq!(
            api.calls(),
            vec![Call::Delete(1), Call::Page(PageQuery::new(1, 10))]
        );
        assert_eq!(session.records().len(), 2);
    }

    #[tokio::test]
    async fn test_declined_delete_sends_nothing() {
        let (api, mut session) = session(FakeApi::new().with_records(3)).await;
        api.clear_calls();

        let outcome = session.delete(1, &AutoConfirm(false)).await.unwrap();
        assert_eq!(outcome, DeleteOutcome::Cancelled);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_cache() {
        let (api, mut session) = session(FakeApi::new().with_records(3).failing_mutations()).await;
        api.clear_calls();

        let err = session.delete(2, &AutoConfirm(true)).await.unwrap_err();
        assert!(err.is_network());
        assert_eq!(api.calls(), vec![Call::Delete(2)]);
        assert_eq!(session.records().len(), 3);
    }

    #[tokio::test]
    async fn test_create_coerces_and_refetches() {
        let (api, mut session) = session(FakeApi::new().with_records(2)).await;
        api.clear_calls();

        let mut form = session.form(FormMode::Create);
        form.set_value("name", "Test Community");
        form.set_value("subs", "100");
        let created = session.submit(&mut form).await.unwrap().unwrap();

        assert_eq!(created.id, Some(3));
        let calls = api.calls();
        assert_eq!(calls.len(), 2);
        let Call::Create(sent) = &calls[0] else {
            panic!("expected a create call");
        };
        assert_eq!(serde_json::to_value(sent).unwrap()["subs"], serde_json::json!(100));
        assert_eq!(calls[1], Call::Page(PageQuery::new(1, 10)));
        assert_eq!(session.records().len(), 3);
    }

    #[tokio::test]
    async fn test_invalid_form_makes_no_network_call() {
        let (api, mut session) = session(FakeApi::new()).await;
        api.clear_calls();

        let mut form = session.form(FormMode::Create);
        form.set_value("name", "A");
        form.set_value("subs", "abc");
        let err = session.submit(&mut form).await.unwrap_err();

        assert!(err.is_validation());
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_update_refetches_from_first_page() {
        let (api, mut session) = session(FakeApi::new().with_records(15)).await;
        session.load_more().await.unwrap();
        api.clear_calls();

        let record = session.find_record(12).await.unwrap();
        let mut form = session.form(FormMode::Edit(record));
        form.set_value("name", "Renamed");
        session.submit(&mut form).await.unwrap();

        assert!(matches!(&api.calls()[0], Call::Update(r) if r.id == Some(12)));
        assert_eq!(page_calls(&api), vec![1]);
        assert_eq!(session.records().len(), 10);
    }

    #[tokio::test]
    async fn test_find_record_pages_forward() {
        let (_api, mut session) = session(FakeApi::new().with_records(25)).await;

        assert_eq!(session.find_record(23).await.unwrap().id, Some(23));
        assert!(matches!(
            session.find_record(99).await,
            Err(AdminError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_page_failure_is_terminal_until_invalidated() {
        let api = Arc::new(FakeApi::new().failing_pages());
        let mut session = Session::open(api.clone(), 10).await.unwrap();

        let err = session.refresh().await.unwrap_err();
        assert!(matches!(err, AdminError::ListFetch { page: 1, .. }));
        assert!(matches!(session.list().unwrap().status(), ListStatus::Error(_)));

        session.refresh().await.unwrap();
        assert_eq!(page_calls(&api), vec![1]);
    }

    #[tokio::test]
    async fn test_search_is_forwarded() {
        let api = Arc::new(FakeApi::new().with_records(2));
        let mut session = Session::open(api.clone(), 10)
            .await
            .unwrap()
            .with_search("rust");
        session.refresh().await.unwrap();

        assert!(api.calls().iter().any(|call| matches!(
            call,
            Call::Page(q) if q.search.as_deref() == Some("rust")
        )));
    }
}
