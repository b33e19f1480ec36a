//! Adapter configuration
//!
//! Two secrets (access credential and database id) plus transport settings.
//! Missing secrets are a valid state: the adapter answers with nothing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Default API root
pub const DEFAULT_BASE_URL: &str = "https://api.notion.com/v1";
/// Protocol version sent with every request
pub const DEFAULT_NOTION_VERSION: &str = "2022-06-28";
/// Environment variable holding the access credential
pub const API_KEY_VAR: &str = "NOTION_API_KEY";
/// Environment variable holding the database id
pub const DATABASE_ID_VAR: &str = "NOTION_DATABASE_ID";

const LEGACY_PREFIX: &str = "VITE_";

/// Notion adapter configuration
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotionConfig {
    /// Integration token
    pub api_key: Option<String>,
    /// Projects database id
    pub database_id: Option<String>,
    /// API root, without trailing slash
    pub base_url: String,
    /// `Notion-Version` header value
    pub notion_version: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Results requested per page (the API caps this at 100)
    pub page_size: u32,
}

impl NotionConfig {
    /// Create default configuration (no secrets)
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read secrets from the process environment
    ///
    /// `NOTION_API_KEY` / `NOTION_DATABASE_ID`, falling back to the
    /// `VITE_`-prefixed names used by the site's build tooling.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read secrets through `lookup`
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| {
            non_blank(lookup(name)).or_else(|| non_blank(lookup(&format!("{LEGACY_PREFIX}{name}"))))
        };
        Self {
            api_key: read(API_KEY_VAR),
            database_id: read(DATABASE_ID_VAR),
            ..Self::default()
        }
    }

    /// With access credential
    #[inline]
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = non_blank(Some(key.into()));
        self
    }

    /// With database id
    #[inline]
    #[must_use]
    pub fn with_database_id(mut self, id: impl Into<String>) -> Self {
        self.database_id = non_blank(Some(id.into()));
        self
    }

    /// With API root
    #[inline]
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// With request timeout
    #[inline]
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// With page size, clamped to 1..=100
    #[inline]
    #[must_use]
    pub fn with_page_size(mut self, size: u32) -> Self {
        self.page_size = size.clamp(1, 100);
        self
    }

    /// Credential and database id are both present
    #[inline]
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some() && self.database_id.is_some()
    }

    /// Credential is present
    #[inline]
    #[must_use]
    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            database_id: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            notion_version: DEFAULT_NOTION_VERSION.to_string(),
            timeout: Duration::from_secs(10),
            page_size: 100,
        }
    }
}

impl fmt::Debug for NotionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotionConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("database_id", &self.database_id)
            .field("base_url", &self.base_url)
            .field("notion_version", &self.notion_version)
            .field("timeout", &self.timeout)
            .field("page_size", &self.page_size)
            .finish()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
