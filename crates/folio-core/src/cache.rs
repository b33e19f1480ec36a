//! Time-boxed cache of the "all projects" query using moka
//!
//! Holds at most one entry: the latest successful result of
//! [`ProjectSource::fetch_all`]. Concurrent misses share one upstream fetch;
//! failures are handed to every waiter and never stored.

use crate::error::{SourceError, SourceResult};
use crate::source::ProjectSource;
use crate::types::{FeedConfig, DEFAULT_CACHE_TTL};
use folio_catalog::ProjectRecord;
use moka::future::Cache;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Statistics for cache monitoring
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of entries in cache (0 or 1, eventually consistent)
    pub entry_count: u64,
    /// Number of upstream fetches started by the cache
    pub refreshes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct AllProjects;

/// Shared cache in front of a [`ProjectSource`]
///
/// Cloning is cheap and every clone sees the same entry, so one instance can
/// serve the whole process.
#[derive(Clone)]
pub struct ProjectCache {
    source: Arc<dyn ProjectSource>,
    inner: Cache<AllProjects, Arc<Vec<ProjectRecord>>>,
    refreshes: Arc<AtomicU64>,
    ttl: Duration,
}

impl ProjectCache {
    /// Create cache with the default five minute TTL
    #[inline]
    #[must_use]
    pub fn new(source: Arc<dyn ProjectSource>) -> Self {
        Self::with_ttl(source, DEFAULT_CACHE_TTL)
    }

    /// Create cache from feed configuration
    #[inline]
    #[must_use]
    pub fn from_config(source: Arc<dyn ProjectSource>, config: &FeedConfig) -> Self {
        Self::with_ttl(source, config.cache_ttl)
    }

    /// Create cache with time-based expiration
    #[must_use]
    pub fn with_ttl(source: Arc<dyn ProjectSource>, ttl: Duration) -> Self {
        Self {
            source,
            inner: Cache::builder().max_capacity(1).time_to_live(ttl).build(),
            refreshes: Arc::new(AtomicU64::new(0)),
            ttl,
        }
    }

    /// Latest "all projects" result, refreshing if absent or expired
    ///
    /// Empty results are cached like any other success.
    pub async fn get(&self) -> SourceResult<Arc<Vec<ProjectRecord>>> {
        let source = Arc::clone(&self.source);
        let refreshes = Arc::clone(&self.refreshes);

        self.inner
            .try_get_with(AllProjects, async move {
                let attempt = refreshes.fetch_add(1, Ordering::Relaxed) + 1;
                tracing::debug!(attempt, "refreshing project cache");
                source.fetch_all().await.map(Arc::new)
            })
            .await
            .map_err(|err: Arc<SourceError>| SourceError::clone(&err))
    }

    /// Cached result without refreshing
    #[inline]
    pub async fn peek(&self) -> Option<Arc<Vec<ProjectRecord>>> {
        self.inner.get(&AllProjects).await
    }

    /// Drop the held result; the next [`get`](Self::get) refetches
    #[inline]
    pub async fn invalidate(&self) {
        tracing::debug!("invalidating project cache");
        self.inner.invalidate(&AllProjects).await;
    }

    /// Source this cache refreshes from
    #[inline]
    #[must_use]
    pub fn source(&self) -> &Arc<dyn ProjectSource> {
        &self.source
    }

    /// Configured time-to-live
    #[inline]
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Get cache statistics
    #[inline]
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entry_count: self.inner.entry_count(),
            refreshes: self.refreshes.load(Ordering::Relaxed),
        }
    }
}

impl fmt::Debug for ProjectCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectCache")
            .field("ttl", &self.ttl)
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}
