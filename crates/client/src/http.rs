//! HTTP implementation of the community API
//!
//! Endpoints, relative to the configured base URL:
//!
//! | Operation | Request |
//! |-----------|---------|
//! | schema | `GET /schema` |
//! | list | `GET /communities?_page={n}&_limit={m}[&q={term}]` |
//! | create | `POST /communities` |
//! | update | `PUT /communities/{id}` |
//! | delete | `DELETE /communities/{id}` |
//!
//! List responses may carry an `X-Total-Count` header which decides
//! whether another page exists.

use async_trait::async_trait;
use community_core::{AdminError, AdminResult, Record, RecordId, Schema, SchemaDocument};
use community_engine::{CommunityApi, Page, PageQuery};
use reqwest::header::HeaderValue;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;

/// Response header carrying the total record count
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// `CommunityApi` over HTTP/JSON
#[derive(Debug, Clone)]
pub struct HttpCommunityApi {
    client: Client,
    base_url: String,
}

impl HttpCommunityApi {
    /// Build a client from configuration
    pub fn new(config: &ClientConfig) -> AdminResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AdminError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ========================================================================
    // Request helpers
    // ========================================================================

    async fn send(&self, request: reqwest::RequestBuilder) -> AdminResult<Response> {
        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        let message = if message.trim().is_empty() {
            status.canonical_reason().unwrap_or("request failed").to_string()
        } else {
            message
        };
        Err(AdminError::Http {
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> AdminResult<T> {
        let body = response.text().await.map_err(transport)?;
        Ok(serde_json::from_str(&body)?)
    }
}

fn transport(err: reqwest::Error) -> AdminError {
    if err.is_timeout() {
        AdminError::Transport(format!("request timed out: {err}"))
    } else {
        AdminError::Transport(err.to_string())
    }
}

/// URL of one list page
pub fn page_url(base_url: &str, query: &PageQuery) -> String {
    let mut url = format!(
        "{}/communities?_page={}&_limit={}",
        base_url, query.page, query.limit
    );
    if let Some(search) = &query.search {
        url.push_str("&q=");
        url.push_str(&urlencoding::encode(search));
    }
    url
}

/// URL of one record
pub fn record_url(base_url: &str, id: RecordId) -> String {
    format!("{}/communities/{}", base_url, id)
}

/// Parse the `X-Total-Count` header; malformed values count as absent
pub fn parse_total_count(value: Option<&HeaderValue>) -> Option<u64> {
    value
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

fn require_id(record: &Record) -> AdminResult<RecordId> {
    record
        .id
        .ok_or_else(|| AdminError::mutation("update", "record has no id"))
}

#[async_trait]
impl CommunityApi for HttpCommunityApi {
    async fn fetch_schema(&self) -> AdminResult<Schema> {
        let url = format!("{}/schema", self.base_url);
        tracing::debug!("GET {}", url);

        let response = self.send(self.client.get(&url)).await?;
        let document: SchemaDocument = Self::decode(response).await?;
        Ok(document.into())
    }

    async fn fetch_page(&self, query: &PageQuery) -> AdminResult<Page> {
        let url = page_url(&self.base_url, query);
        tracing::debug!("GET {}", url);

        let response = self.send(self.client.get(&url)).await?;
        let total = parse_total_count(response.headers().get(TOTAL_COUNT_HEADER));
        let items: Vec<Record> = Self::decode(response).await?;

        Ok(Page::from_response(items, query.page, query.limit, total))
    }

    async fn create(&self, record: &Record) -> AdminResult<Record> {
        let url = format!("{}/communities", self.base_url);
        tracing::debug!("POST {}", url);

        let response = self.send(self.client.post(&url).json(record)).await?;
        Self::decode(response).await
    }

    async fn update(&self, record: &Record) -> AdminResult<Record> {
        let url = record_url(&self.base_url, require_id(record)?);
        tracing::debug!("PUT {}", url);

        let response = self.send(self.client.put(&url).json(record)).await?;
        Self::decode(response).await
    }

    async fn delete(&self, id: RecordId) -> AdminResult<()> {
        let url = record_url(&self.base_url, id);
        tracing::debug!("DELETE {}", url);

        self.send(self.client.delete(&url)).await?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_url() {
        assert_eq!(
            page_url("http://localhost:3000", &PageQuery::new(2, 10)),
            "http://localhost:3000/communities?_page=2&_limit=10"
        );
    }

    #[test]
    fn test_page_url_encodes_search() {
        let query = PageQuery::new(1, 10).with_search("rust & go");
        assert_eq!(
            page_url("http://api", &query),
            "http://api/communities?_page=1&_limit=10&q=rust%20%26%20go"
        );
    }

    #[test]
    fn test_record_url() {
        assert_eq!(record_url("http://api", 42), "http://api/communities/42");
    }

    #[test]
    fn test_parse_total_count() {
        assert_eq!(parse_total_count(Some(&HeaderValue::from_static("25"))), Some(25));
        assert_eq!(parse_total_count(Some(&HeaderValue::from_static("lots"))), None);
        assert_eq!(parse_total_count(None), None);
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let config = ClientConfig::default().with_api_url("http://api.test/");
        let api = HttpCommunityApi::new(&config).unwrap();
        assert_eq!(api.base_url(), "http://api.test");
    }

    #[tokio::test]
    async fn test_update_without_id_never_sends() {
        let api = HttpCommunityApi::new(&ClientConfig::default()).unwrap();
        let err = api.update(&Record::new()).await.unwrap_err();
        assert!(matches!(err, AdminError::Mutation { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let config = ClientConfig::default()
            .with_api_url("http://127.0.0.1:9")
            .with_timeout_secs(5);
        let api = HttpCommunityApi::new(&config).unwrap();

        let err = api.fetch_schema().await.unwrap_err();
        assert!(matches!(err, AdminError::Transport(_)));
    }
}
