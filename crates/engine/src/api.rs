//! API seam
//!
//! [`CommunityApi`] is the only way the engine talks to the server. The HTTP
//! implementation lives in `community_client`; tests substitute an
//! in-memory fake.

use async_trait::async_trait;
use community_core::{AdminError, AdminResult, Record, RecordId, Schema, Validatable};

use crate::pagination::{Page, PageRequest};

/// Parameters of a list request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    /// 1-based page number
    pub page: u32,
    /// Page size
    pub limit: u32,
    /// Optional free-text filter, passed to the server as `q`
    pub search: Option<String>,
}

impl PageQuery {
    /// Query for one page without a filter
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            search: None,
        }
    }

    /// Add a free-text filter; blank filters are dropped
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        self.search = (!search.trim().is_empty()).then_some(search);
        self
    }
}

impl From<&PageRequest> for PageQuery {
    fn from(request: &PageRequest) -> Self {
        Self::new(request.page, request.limit)
    }
}

/// Remote community store
#[async_trait]
pub trait CommunityApi: Send + Sync {
    /// Fetch the field schema
    async fn fetch_schema(&self) -> AdminResult<Schema>;

    /// Fetch one page of records
    async fn fetch_page(&self, query: &PageQuery) -> AdminResult<Page>;

    /// Create a record, returning it as stored
    async fn create(&self, record: &Record) -> AdminResult<Record>;

    /// Replace a record by id, returning it as stored
    async fn update(&self, record: &Record) -> AdminResult<Record>;

    /// Delete a record by id
    async fn delete(&self, id: RecordId) -> AdminResult<()>;
}

/// Yes/no prompt shown before destructive actions
#[async_trait(?Send)]
pub trait Confirm {
    /// Ask the user; `true` means proceed
    async fn confirm(&self, message: &str) -> bool;
}

/// Confirmation that always answers the same
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

#[async_trait(?Send)]
impl Confirm for AutoConfirm {
    async fn confirm(&self, _message: &str) -> bool {
        self.0
    }
}

/// Prompt shown before deleting a record
pub fn delete_prompt(id: RecordId) -> String {
    format!("Delete community #{id}?")
}

// ============================================================================
// Operations
// ============================================================================

/// Fetch and check the schema.
///
/// Any failure is reported as a schema load error. Non-fatal schema
/// problems are logged.
pub async fn load_schema<A>(api: &A) -> AdminResult<Schema>
where
    A: CommunityApi + ?Sized,
{
    let schema = api.fetch_schema().await.map_err(|err| match err {
        AdminError::SchemaLoad(_) => err,
        other => AdminError::schema_load(other.to_string()),
    })?;

    schema
        .validate()
        .map_err(|err| AdminError::schema_load(err.to_string()))?;
    for warning in schema.warnings() {
        tracing::warn!("Schema: {}", warning);
    }

    tracing::info!("Loaded schema with {} fields", schema.len());
    Ok(schema)
}

/// Fetch one page, tagging failures with the page number
pub async fn fetch_page<A>(api: &A, query: &PageQuery) -> AdminResult<Page>
where
    A: CommunityApi + ?Sized,
{
    api.fetch_page(query).await.map_err(|err| match err {
        AdminError::ListFetch { .. } => err,
        other => AdminError::list_fetch(query.page, other.to_string()),
    })
}

/// Delete a record, reporting failures as a mutation error
pub async fn delete_record<A>(api: &A, id: RecordId) -> AdminResult<()>
where
    A: CommunityApi + ?Sized,
{
    api.delete(id).await.map_err(|err| mutation_error("delete", err))?;
    tracing::info!("Deleted community #{}", id);
    Ok(())
}

pub(crate) fn mutation_error(operation: &str, err: AdminError) -> AdminError {
    match err {
        AdminError::Mutation { .. } | AdminError::Validation(_) => err,
        other => AdminError::mutation(operation, other.to_string()),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, FakeApi};
    use community_core::FieldDescriptor;

    #[test]
    fn test_page_query_search() {
        assert_eq!(PageQuery::new(1, 10).with_search("  ").search, None);
        assert_eq!(
            PageQuery::new(1, 10).with_search("rust").search.as_deref(),
            Some("rust")
        );
    }

    #[tokio::test]
    async fn test_load_schema_wraps_failures() {
        let api = FakeApi::new().failing_schema();
        let err = load_schema(&api).await.unwrap_err();

        assert!(matches!(err, AdminError::SchemaLoad(_)));
        assert!(err.to_string().starts_with("Failed to load schema"));
    }

    #[tokio::test]
    async fn test_load_schema_rejects_duplicate_fields() {
        let api = FakeApi::new().with_schema(Schema::new(vec![
            FieldDescriptor::text("name", "Name"),
            FieldDescriptor::text("name", "Name again"),
        ]));

        assert!(matches!(
            load_schema(&api).await,
            Err(AdminError::SchemaLoad(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_page_tags_page_number() {
        let api = FakeApi::new().failing_pages();
        let err = fetch_page(&api, &PageQuery::new(3, 10)).await.unwrap_err();
        assert!(matches!(err, AdminError::ListFetch { page: 3, .. }));
    }

    #[tokio::test]
    async fn test_delete_record_reports_mutation_error() {
        let api = FakeApi::new().failing_mutations();
        let err = delete_record(&api, 7).await.unwrap_err();

        assert!(matches!(err, AdminError::Mutation { ref operation, .. } if operation == "delete"));
        assert_eq!(api.calls(), vec![Call::Delete(7)]);
    }

    #[tokio::test]
    async fn test_auto_confirm() {
        assert!(AutoConfirm(true).confirm("x").await);
        assert!(!AutoConfirm(false).confirm("x").await);
    }
}
