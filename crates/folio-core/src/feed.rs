//! Project feed
//!
//! Resolves a [`FilterIntent`] into a [`ProjectsView`] with a fixed policy:
//! - Remote records win whenever there is at least one
//! - An empty remote answer falls back to the static catalog, filtered locally
//! - A failed remote answer falls back the same way and adds a notice
//! - A resolution overtaken by a newer intent is never published
//!
//! Resolutions run on their own task, so a caller that stops waiting does
//! not leave the feed loading.

use crate::cache::ProjectCache;
use crate::error::{SourceError, SourceResult};
use crate::types::{FeedNotice, FilterIntent, ProjectsView};
use folio_catalog::{Catalog, ProjectRecord};
use futures::FutureExt;
use parking_lot::Mutex;
use std::any::Any;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Debug, Default)]
struct IntentSlot {
    /// Intent of the latest resolution; `None` before the first one
    intent: Option<FilterIntent>,
    /// Bumped on every intent change; resolutions carry the value they started with
    generation: u64,
}

struct Shared {
    cache: ProjectCache,
    catalog: Arc<Catalog>,
    slot: Mutex<IntentSlot>,
    state: watch::Sender<ProjectsView>,
}

/// Remote-first project feed with static fallback
pub struct ProjectFeed {
    shared: Arc<Shared>,
}

impl ProjectFeed {
    /// Create feed over `cache` (and its source) with `catalog` as fallback
    #[must_use]
    pub fn new(cache: ProjectCache, catalog: Arc<Catalog>) -> Self {
        let (state, _) = watch::channel(ProjectsView::loading());
        Self {
            shared: Arc::new(Shared {
                cache,
                catalog,
                slot: Mutex::new(IntentSlot::default()),
                state,
            }),
        }
    }

    /// Create feed that falls back to the bundled catalog
    #[inline]
    #[must_use]
    pub fn with_bundled_catalog(cache: ProjectCache) -> Self {
        Self::new(cache, Catalog::bundled())
    }

    /// Receive every published view
    #[inline]
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ProjectsView> {
        self.shared.state.subscribe()
    }

    /// Latest published view
    #[inline]
    #[must_use]
    pub fn current(&self) -> ProjectsView {
        self.shared.state.borrow().clone()
    }

    /// Intent of the latest resolution, if any has started
    #[inline]
    #[must_use]
    pub fn intent(&self) -> Option<FilterIntent> {
        self.shared.slot.lock().intent.clone()
    }

    /// Switch to `intent` and resolve it
    ///
    /// Must be called within a tokio runtime. The resolution runs on a
    /// spawned task and publishes even if this future is dropped. Repeating
    /// the current intent does not start a new cycle; it waits for the view
    /// to settle instead. Returns the view current when the call completes,
    /// which belongs to a newer intent if this one was overtaken in flight.
    pub async fn set_intent(&self, intent: FilterIntent) -> ProjectsView {
        let Some(token) = self.shared.begin(&intent) else {
            return self.settled().await;
        };

        let shared = Arc::clone(&self.shared);
        let task = tokio::spawn(async move {
            let view = shared.resolve(&intent).await;
            shared.publish(token, view);
        });
        if let Err(err) = task.await {
            tracing::error!(error = %err, "project resolution task did not complete");
        }
        self.current()
    }

    /// Single project by id, remote first then the static catalog
    pub async fn lookup(&self, id: &str) -> Option<ProjectRecord> {
        if let Some(record) = self.shared.cache.source().fetch_project(id).await {
            return Some(record);
        }
        self.shared.catalog.find(id).cloned()
    }

    /// Shared cache used for unfiltered queries
    #[inline]
    #[must_use]
    pub fn cache(&self) -> &ProjectCache {
        &self.shared.cache
    }

    /// Fallback catalog
    #[inline]
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.shared.catalog
    }

    /// Next view that is not loading
    async fn settled(&self) -> ProjectsView {
        let mut rx = self.subscribe();
        let settled = match rx.wait_for(|view| !view.is_loading).await {
            Ok(view) => view.clone(),
            Err(_) => self.current(),
        };
        settled
    }
}

impl Shared {
    fn begin(&self, intent: &FilterIntent) -> Option<u64> {
        let mut slot = self.slot.lock();
        if slot.intent.as_ref() == Some(intent) {
            return None;
        }
        slot.intent = Some(intent.clone());
        slot.generation += 1;

        // Previous records stay visible while loading
        self.state.send_modify(|view| {
            view.is_loading = true;
            view.error = None;
        });
        Some(slot.generation)
    }

    fn publish(&self, token: u64, view: ProjectsView) -> bool {
        let slot = self.slot.lock();
        if slot.generation != token {
            tracing::debug!(token, current = slot.generation, "discarding stale project resolution");
            return false;
        }
        self.state.send_replace(view);
        true
    }

    async fn resolve(&self, intent: &FilterIntent) -> ProjectsView {
        let remote = AssertUnwindSafe(self.fetch_remote(intent))
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| Err(SourceError::Unexpected(panic_message(&*panic))));

        match remote {
            Ok(records) if !records.is_empty() => {
                tracing::debug!(count = records.len(), "serving remote projects");
                ProjectsView::remote(records)
            }
            Ok(_) => {
                let records = self.catalog.filter(&intent.to_filter());
                let error = (records.is_empty() && !self.cache.source().credential_configured())
                    .then_some(FeedNotice::NotConfigured);
                tracing::debug!(count = records.len(), "remote returned nothing; serving local projects");
                ProjectsView::local(records, error)
            }
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    transient = err.is_transient(),
                    "remote project query failed; serving local projects"
                );
                let records = self.catalog.filter(&intent.to_filter());
                ProjectsView::local(records, Some(FeedNotice::LocalFallback))
            }
        }
    }

    /// Category takes precedence over tag for the server-side query; only the
    /// unfiltered query goes through the cache.
    async fn fetch_remote(&self, intent: &FilterIntent) -> SourceResult<Vec<ProjectRecord>> {
        let source = self.cache.source();
        match (intent.category(), intent.tag()) {
            (Some(category), _) => source.fetch_by_category(category).await,
            (None, Some(tag)) => source.fetch_by_tag(tag).await,
            (None, None) => self.cache.get().await.map(|records| records.as_ref().clone()),
        }
    }
}

impl fmt::Debug for ProjectFeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectFeed")
            .field("cache", &self.shared.cache)
            .field("catalog_len", &self.shared.catalog.len())
            .field("slot", &*self.shared.slot.lock())
            .finish_non_exhaustive()
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "panic in project source".to_string()
    }
}
