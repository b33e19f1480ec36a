//! Folio Catalog
//!
//! The canonical project model and the static dataset that backs the site when
//! the content backend has nothing to offer.
//!
//! # Core Types
//!
//! - [`ProjectRecord`]: normalized portfolio item
//! - [`ProjectCategory`] / [`ProjectStatus`]: closed enumerations
//! - [`ProjectIcon`]: symbolic glyph names with a fixed default
//! - [`Catalog`]: bundled records and their pure queries
//!
//! # Example
//!
//! ```rust
//! use folio_catalog::{Catalog, ProjectCategory, ProjectFilter};
//!
//! let catalog = Catalog::bundled();
//! let web = catalog.filter(&ProjectFilter::new().with_category(ProjectCategory::Web));
//! assert!(web.iter().all(|p| p.category == ProjectCategory::Web));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod catalog;
pub mod error;
pub mod filter;
pub mod icon;
pub mod record;

pub use catalog::Catalog;
pub use error::RecordError;
pub use filter::ProjectFilter;
pub use icon::{ProjectIcon, DEFAULT_ICON_NAME};
pub use record::{Metric, ProjectCategory, ProjectLinks, ProjectRecord, ProjectStatus};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with project records
    pub use crate::{Catalog, ProjectCategory, ProjectFilter, ProjectRecord, ProjectStatus};
}
