//! Testing utilities for Folio workspace
//!
//! Shared fixtures, a scripted project source, and tracing setup.

#![allow(missing_docs)]

use async_trait::async_trait;
use folio_catalog::{Catalog, ProjectCategory, ProjectRecord, ProjectStatus};
use folio_core::{ProjectCache, ProjectFeed, ProjectSource, SourceError, SourceResult};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Install a test-friendly subscriber; safe to call from every test
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

pub fn record(id: &str, category: ProjectCategory) -> ProjectRecord {
    ProjectRecord::new(
        id,
        format!("Project {id}"),
        format!("Description of {id}"),
        category,
        ProjectStatus::Production,
        2024,
    )
}

pub fn tagged(id: &str, category: ProjectCategory, tags: &[&str]) -> ProjectRecord {
    record(id, category).with_tags(tags.iter().copied())
}

/// Eight records, three of them `web`
pub fn eight_project_catalog() -> Catalog {
    Catalog::from_records(vec![
        tagged("w1", ProjectCategory::Web, &["Web", "Design"]),
        tagged("s1", ProjectCategory::Saas, &["SaaS", "Fintech"]),
        tagged("w2", ProjectCategory::Web, &["Web", "Backend"]),
        tagged("m1", ProjectCategory::Mobile, &["Mobile"]),
        tagged("t1", ProjectCategory::Traffic, &["Ads"]),
        tagged("i1", ProjectCategory::Infrastructure, &["Backend", "DevOps"]),
        tagged("w3", ProjectCategory::Web, &["Web", "Analytics"]),
        tagged("m2", ProjectCategory::Mobile, &["Mobile", "IA"]),
    ])
}

/// Which listing query a scripted response answers
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Query {
    All,
    Category(ProjectCategory),
    Tag(String),
}

#[derive(Debug, Clone)]
struct Scripted {
    result: SourceResult<Vec<ProjectRecord>>,
    delay: Duration,
    panics: bool,
}

/// Project source answering from a script
///
/// Unscripted queries answer `Ok(vec![])` immediately. Every call is counted.
#[derive(Debug, Default)]
pub struct StubSource {
    configured: bool,
    script: HashMap<Query, Scripted>,
    projects: HashMap<String, ProjectRecord>,
    calls: Mutex<HashMap<Query, usize>>,
}

impl StubSource {
    /// Source with no credential and no data
    pub fn unconfigured() -> Self {
        Self::default()
    }

    /// Source with a credential and no data yet
    pub fn configured() -> Self {
        Self {
            configured: true,
            ..Self::default()
        }
    }

    pub fn respond(mut self, query: Query, result: SourceResult<Vec<ProjectRecord>>) -> Self {
        self.script.insert(
            query,
            Scripted {
                result,
                delay: Duration::ZERO,
                panics: false,
            },
        );
        self
    }

    pub fn respond_after(
        mut self,
        query: Query,
        delay: Duration,
        result: SourceResult<Vec<ProjectRecord>>,
    ) -> Self {
        self.script.insert(
            query,
            Scripted {
                result,
                delay,
                panics: false,
            },
        );
        self
    }

    pub fn fail(self, query: Query, status: u16) -> Self {
        self.respond(query, Err(SourceError::status(status, "scripted failure")))
    }

    pub fn panic_on(mut self, query: Query) -> Self {
        self.script.insert(
            query,
            Scripted {
                result: Ok(Vec::new()),
                delay: Duration::ZERO,
                panics: true,
            },
        );
        self
    }

    pub fn with_project(mut self, record: ProjectRecord) -> Self {
        self.projects.insert(record.id.clone(), record);
        self
    }

    pub fn calls(&self, query: &Query) -> usize {
        self.calls.lock().get(query).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().values().sum()
    }

    async fn answer(&self, query: Query) -> SourceResult<Vec<ProjectRecord>> {
        *self.calls.lock().entry(query.clone()).or_insert(0) += 1;
        let Some(scripted) = self.script.get(&query).cloned() else {
            return Ok(Vec::new());
        };
        if !scripted.delay.is_zero() {
            tokio::time::sleep(scripted.delay).await;
        }
        if scripted.panics {
            panic!("scripted panic for {query:?}");
        }
        scripted.result
    }
}

#[async_trait]
impl ProjectSource for StubSource {
    fn credential_configured(&self) -> bool {
        self.configured
    }

    async fn fetch_all(&self) -> SourceResult<Vec<ProjectRecord>> {
        self.answer(Query::All).await
    }

    async fn fetch_by_category(&self, category: ProjectCategory) -> SourceResult<Vec<ProjectRecord>> {
        self.answer(Query::Category(category)).await
    }

    async fn fetch_by_tag(&self, tag: &str) -> SourceResult<Vec<ProjectRecord>> {
        self.answer(Query::Tag(tag.to_string())).await
    }

    async fn fetch_project(&self, id: &str) -> Option<ProjectRecord> {
        self.projects.get(id).cloned()
    }
}

/// Feed over `source` with a one minute cache and `catalog` as fallback
pub fn feed_with(source: Arc<StubSource>, catalog: Catalog) -> ProjectFeed {
    let cache = ProjectCache::with_ttl(source, Duration::from_secs(60));
    ProjectFeed::new(cache, Arc::new(catalog))
}
