//! Client configuration
//!
//! Resolution order, later wins:
//!
//! 1. built-in defaults
//! 2. TOML file (`community-admin.toml` in the working directory, or an
//!    explicit path)
//! 3. environment (`COMMUNITY_API_URL`, `COMMUNITY_PAGE_SIZE`,
//!    `COMMUNITY_REQUEST_TIMEOUT`)
//! 4. command-line flags, applied by the binaries
//!
//! ```toml
//! api_url = "http://localhost:3000"
//! page_size = 10
//! request_timeout_secs = 15
//! ```

use std::path::Path;
use std::time::Duration;

use community_core::{AdminError, AdminResult, ResultExt};
use community_engine::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};

/// Base URL used when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "community-admin.toml";

pub const ENV_API_URL: &str = "COMMUNITY_API_URL";
pub const ENV_PAGE_SIZE: &str = "COMMUNITY_PAGE_SIZE";
pub const ENV_REQUEST_TIMEOUT: &str = "COMMUNITY_REQUEST_TIMEOUT";

/// Settings for talking to the community API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the API, without a trailing slash
    pub api_url: String,
    /// Records requested per page
    pub page_size: u32,
    /// Per-request timeout; no timeout when unset or zero
    pub request_timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout_secs: None,
        }
    }
}

impl ClientConfig {
    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml(content: &str) -> AdminResult<Self> {
        toml::from_str(content).map_err(|e| AdminError::InvalidConfig(e.to_string()))
    }

    /// Read a TOML file
    pub fn from_file(path: &Path) -> AdminResult<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(format!("Failed to read {}", path.display()))?;
        toml::from_str(&content)
            .map_err(|e| AdminError::InvalidConfig(format!("{}: {}", path.display(), e)))
    }

    /// Resolve defaults, file and environment.
    ///
    /// An explicit path must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> AdminResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(CONFIG_FILE_NAME).is_file() => {
                Self::from_file(Path::new(CONFIG_FILE_NAME))?
            }
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;

        tracing::debug!("Client config: {:?}", config);
        Ok(config)
    }

    /// Override fields from environment variables read through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> AdminResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            self.api_url = url;
        }
        if let Some(size) = lookup(ENV_PAGE_SIZE) {
            self.page_size = size.trim().parse().map_err(|_| {
                AdminError::InvalidConfig(format!("{ENV_PAGE_SIZE} is not a number: {size}"))
            })?;
        }
        if let Some(secs) = lookup(ENV_REQUEST_TIMEOUT) {
            self.request_timeout_secs = match secs.trim() {
                "" | "0" => None,
                value => Some(value.parse().map_err(|_| {
                    AdminError::InvalidConfig(format!(
                        "{ENV_REQUEST_TIMEOUT} is not a number: {secs}"
                    ))
                })?),
            };
        }
        Ok(())
    }

    /// Set the base URL
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Set the page size
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the request timeout
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = (secs > 0).then_some(secs);
        self
    }

    /// Base URL with any trailing slash removed
    pub fn base_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }

    /// Request timeout as a duration; zero means none
    pub fn timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Check the values are usable
    pub fn validate(&self) -> AdminResult<()> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(AdminError::InvalidConfig(format!(
                "api_url must start with http:// or https://, got '{}'",
                self.api_url
            )));
        }
        if self.page_size == 0 {
            return Err(AdminError::InvalidConfig(
                "page_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
