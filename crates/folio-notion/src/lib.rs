//! Folio Notion
//!
//! [`ProjectSource`](folio_core::ProjectSource) backed by a Notion database.
//!
//! - [`NotionConfig`]: credential, database id and transport settings
//! - [`NotionClient`]: paginated queries and single-page reads
//! - [`translate`]: page properties to [`ProjectRecord`](folio_catalog::ProjectRecord)
//!
//! # Example
//!
//! ```rust,ignore
//! use folio_core::{FilterIntent, ProjectCache, ProjectFeed};
//! use folio_notion::NotionClient;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), folio_notion::NotionError> {
//! let client = Arc::new(NotionClient::from_env()?);
//! let feed = ProjectFeed::with_bundled_catalog(ProjectCache::new(client));
//! let view = feed.set_intent(FilterIntent::all()).await;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod client;
pub mod config;
pub mod error;
pub mod query;
pub mod schema;
pub mod translate;

pub use client::{NotionClient, MAX_PAGES};
pub use config::NotionConfig;
pub use error::NotionError;
pub use query::ProjectQuery;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
