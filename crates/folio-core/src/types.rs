//! Core types for the project feed
//!
//! Defines:
//! - Feed configuration
//! - Filter intent (what the caller wants to see)
//! - The published view and its advisory notices

use folio_catalog::{ProjectCategory, ProjectFilter, ProjectRecord};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Default lifetime of the cached "all projects" result
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Feed configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedConfig {
    /// How long a fetched "all projects" result is served before refreshing
    pub cache_ttl: Duration,
}

impl FeedConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With cache TTL
    #[inline]
    #[must_use]
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }
}

/// What the caller wants listed
///
/// A blank tag is the same as no tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterIntent {
    category: Option<ProjectCategory>,
    tag: Option<String>,
}

impl FilterIntent {
    /// No filter
    #[inline]
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Only `category`
    #[inline]
    #[must_use]
    pub fn by_category(category: ProjectCategory) -> Self {
        Self::all().with_category(category)
    }

    /// Only projects tagged `tag`
    #[inline]
    #[must_use]
    pub fn by_tag(tag: impl Into<String>) -> Self {
        Self::all().with_tag(tag)
    }

    /// With category
    #[inline]
    #[must_use]
    pub fn with_category(mut self, category: ProjectCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// With tag; blank tags clear the tag filter
    #[inline]
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        self.tag = if tag.trim().is_empty() { None } else { Some(tag) };
        self
    }

    /// Category filter, if any
    #[inline]
    #[must_use]
    pub fn category(&self) -> Option<ProjectCategory> {
        self.category
    }

    /// Tag filter, if any
    #[inline]
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Equivalent predicate for local filtering
    #[must_use]
    pub fn to_filter(&self) -> ProjectFilter {
        ProjectFilter {
            category: self.category,
            tag: self.tag.clone(),
            status: None,
        }
    }
}

/// Advisory attached to a view served from local data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedNotice {
    /// No data anywhere and the backend credential is unset
    NotConfigured,
    /// The backend query failed; local data is shown instead
    LocalFallback,
}

impl FeedNotice {
    /// User-facing message
    #[inline]
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::NotConfigured => {
                "Notion não configurado. Configure NOTION_API_KEY e NOTION_DATABASE_ID."
            }
            Self::LocalFallback => "Erro ao carregar projetos. Usando dados locais.",
        }
    }
}

impl fmt::Display for FeedNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Snapshot published by the feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectsView {
    /// Records to render
    pub records: Vec<ProjectRecord>,
    /// A resolution is in flight
    pub is_loading: bool,
    /// Advisory, if any
    pub error: Option<FeedNotice>,
    /// Records came from the backend rather than the static catalog
    pub using_remote: bool,
}

impl ProjectsView {
    /// Initial state before the first resolution completes
    #[inline]
    #[must_use]
    pub fn loading() -> Self {
        Self {
            records: Vec::new(),
            is_loading: true,
            error: None,
            using_remote: false,
        }
    }

    /// Settled view backed by remote records
    #[inline]
    #[must_use]
    pub fn remote(records: Vec<ProjectRecord>) -> Self {
        Self {
            records,
            is_loading: false,
            error: None,
            using_remote: true,
        }
    }

    /// Settled view backed by the static catalog
    #[inline]
    #[must_use]
    pub fn local(records: Vec<ProjectRecord>, error: Option<FeedNotice>) -> Self {
        Self {
            records,
            is_loading: false,
            error,
            using_remote: false,
        }
    }

    /// Advisory text, if any
    #[inline]
    #[must_use]
    pub fn error_message(&self) -> Option<&'static str> {
        self.error.as_ref().map(FeedNotice::message)
    }
}

impl Default for ProjectsView {
    fn default() -> Self {
        Self::loading()
    }
}
