//! Notion HTTP client
//!
//! Lists the projects database with cursor pagination and reads single
//! pages. An unconfigured client never touches the network and answers
//! with nothing.

use crate::config::NotionConfig;
use crate::error::NotionError;
use crate::query::ProjectQuery;
use crate::schema::{Page, QueryResponse};
use crate::translate::{page_to_record, pages_to_records};
use async_trait::async_trait;
use chrono::Datelike;
use folio_catalog::{ProjectCategory, ProjectRecord};
use folio_core::{ProjectSource, SourceError, SourceResult};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use std::fmt;

/// Upper bound on batches followed for one listing
pub const MAX_PAGES: usize = 50;

const NOTION_VERSION_HEADER: &str = "Notion-Version";

/// Client for the projects database
#[derive(Clone)]
pub struct NotionClient {
    http: Client,
    config: NotionConfig,
}

impl NotionClient {
    /// Create a client from configuration
    pub fn new(config: NotionConfig) -> Result<Self, NotionError> {
        Url::parse(&config.base_url)
            .map_err(|e| NotionError::Config(format!("invalid base url {:?}: {e}", config.base_url)))?;
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    /// Create a client from the process environment
    pub fn from_env() -> Result<Self, NotionError> {
        Self::new(NotionConfig::from_env())
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &NotionConfig {
        &self.config
    }

    /// List projects matching `query`
    ///
    /// Returns an empty list without any request when either secret is
    /// missing. Follows `next_cursor` for at most [`MAX_PAGES`] batches.
    /// Pages that do not translate are dropped; repeated ids keep the first.
    pub async fn query(&self, query: &ProjectQuery) -> Result<Vec<ProjectRecord>, NotionError> {
        let (Some(api_key), Some(database_id)) = (self.config.api_key.as_deref(), self.config.database_id.as_deref())
        else {
            tracing::warn!(%query, "notion not configured, returning no projects");
            return Ok(Vec::new());
        };

        let url = format!("{}/databases/{database_id}/query", self.config.base_url);
        let mut pages: Vec<Page> = Vec::new();
        let mut cursor: Option<String> = None;
        let mut batches = 0;

        loop {
            let body = query.body(self.config.page_size, cursor.as_deref());
            let response = self
                .http
                .post(&url)
                .bearer_auth(api_key)
                .header(NOTION_VERSION_HEADER, &self.config.notion_version)
                .json(&body)
                .send()
                .await?;
            let batch: QueryResponse = read_json(response).await?;
            batches += 1;
            pages.extend(batch.results);

            match batch.next_cursor {
                Some(next) if batch.has_more => {
                    if batches >= MAX_PAGES {
                        tracing::warn!(%query, batches, "stopping pagination at batch limit");
                        break;
                    }
                    cursor = Some(next);
                }
                _ => break,
            }
        }

        let records = pages_to_records(&pages, current_year());
        tracing::debug!(%query, pages = pages.len(), records = records.len(), batches, "notion query complete");
        Ok(records)
    }

    /// Read one project page by id
    ///
    /// Only the credential is required. `Ok(None)` when unconfigured, for a
    /// blank id, or when the page does not translate.
    pub async fn page(&self, id: &str) -> Result<Option<ProjectRecord>, NotionError> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            return Ok(None);
        };
        let id = id.trim();
        if id.is_empty() {
            return Ok(None);
        }

        let url = format!("{}/pages/{id}", self.config.base_url);
        let response = self
            .http
            .get(&url)
            .bearer_auth(api_key)
            .header(NOTION_VERSION_HEADER, &self.config.notion_version)
            .send()
            .await?;
        let page: Page = read_json(response).await?;

        match page_to_record(&page, current_year()) {
            Ok(record) => Ok(Some(record)),
            Err(err) => {
                tracing::warn!(page_id = %page.id, error = %err, "page is not a valid project");
                Ok(None)
            }
        }
    }

    async fn list(&self, query: ProjectQuery) -> SourceResult<Vec<ProjectRecord>> {
        self.query(&query).await.map_err(|err| {
            tracing::error!(%query, error = %err, "notion query failed");
            SourceError::from(err)
        })
    }
}

impl fmt::Debug for NotionClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotionClient")
            .field("base_url", &self.config.base_url)
            .field("database_id", &self.config.database_id)
            .field("credential", &self.config.has_credential())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ProjectSource for NotionClient {
    fn credential_configured(&self) -> bool {
        self.config.has_credential()
    }

    async fn fetch_all(&self) -> SourceResult<Vec<ProjectRecord>> {
        self.list(ProjectQuery::All).await
    }

    async fn fetch_by_category(&self, category: ProjectCategory) -> SourceResult<Vec<ProjectRecord>> {
        self.list(ProjectQuery::Category(category)).await
    }

    async fn fetch_by_tag(&self, tag: &str) -> SourceResult<Vec<ProjectRecord>> {
        self.list(ProjectQuery::Tag(tag.to_string())).await
    }

    async fn fetch_project(&self, id: &str) -> Option<ProjectRecord> {
        self.page(id).await.unwrap_or_else(|err| {
            tracing::error!(page_id = id, error = %err, "notion page fetch failed");
            None
        })
    }
}

/// Body of a successful response as `T`, or a status error carrying the body
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, NotionError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(NotionError::status(status.as_u16(), body));
    }
    Ok(serde_json::from_str(&body)?)
}

fn current_year() -> i32 {
    chrono::Utc::now().year()
}
