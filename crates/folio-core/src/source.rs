//! Remote project source seam
//!
//! The feed and the cache talk to the content backend only through
//! [`ProjectSource`]. Listing queries distinguish "nothing there" (`Ok` with
//! an empty list, which is also what an unconfigured source returns) from
//! "could not ask" (`Err`).

use crate::error::SourceResult;
use async_trait::async_trait;
use folio_catalog::{ProjectCategory, ProjectRecord};

/// Upstream provider of project records
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectSource: Send + Sync {
    /// Whether the access credential is present
    ///
    /// Only the credential counts; a missing dataset id alone does not.
    fn credential_configured(&self) -> bool;

    /// Every non-archived project, newest year first
    async fn fetch_all(&self) -> SourceResult<Vec<ProjectRecord>>;

    /// Non-archived projects in `category`
    async fn fetch_by_category(&self, category: ProjectCategory) -> SourceResult<Vec<ProjectRecord>>;

    /// Non-archived projects carrying `tag`
    async fn fetch_by_tag(&self, tag: &str) -> SourceResult<Vec<ProjectRecord>>;

    /// A single project by id; `None` on absence or any failure
    async fn fetch_project(&self, id: &str) -> Option<ProjectRecord>;
}
