//! Folio Core
//!
//! Project retrieval for the portfolio site:
//! - A [`ProjectSource`] seam for the remote content backend
//! - A shared [`ProjectCache`] for the unfiltered query
//! - A [`ProjectFeed`] that prefers remote records and falls back to the
//!   static catalog, publishing one reactive [`ProjectsView`]
//!
//! # Architecture
//!
//! ```text
//! caller ── FilterIntent ──▶ ProjectFeed ──▶ ProjectCache ──▶ ProjectSource (all)
//!                               │       └──────────────────▶ ProjectSource (category / tag)
//!                               └─▶ Catalog (fallback, filtered locally)
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use folio_core::{FilterIntent, ProjectCache, ProjectFeed};
//! use std::sync::Arc;
//!
//! # async fn example(source: Arc<dyn folio_core::ProjectSource>) {
//! let feed = ProjectFeed::with_bundled_catalog(ProjectCache::new(source));
//! let view = feed.set_intent(FilterIntent::all()).await;
//! println!("{} projects (remote: {})", view.records.len(), view.using_remote);
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
pub mod cache;
pub mod error;
pub mod feed;
pub mod source;
pub mod types;

// Re-exports for convenience
pub use cache::{CacheStats, ProjectCache};
pub use error::{SourceError, SourceResult};
pub use feed::ProjectFeed;
pub use source::ProjectSource;
pub use types::{FeedConfig, FeedNotice, FilterIntent, ProjectsView, DEFAULT_CACHE_TTL};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the project feed
    pub use crate::{
        FeedConfig, FeedNotice, FilterIntent, ProjectCache, ProjectFeed, ProjectSource, ProjectsView,
        SourceError,
    };
    pub use folio_catalog::prelude::*;
}
