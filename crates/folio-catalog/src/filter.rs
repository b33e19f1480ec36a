//! Combined record predicate
//!
//! An unset dimension matches everything. A set category or status must match
//! exactly; a set tag must appear in the record's tag list.

use crate::record::{ProjectCategory, ProjectRecord, ProjectStatus};
use serde::{Deserialize, Serialize};

/// Optional category / tag / status filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectFilter {
    /// Exact category
    pub category: Option<ProjectCategory>,
    /// Tag that must be present
    pub tag: Option<String>,
    /// Exact status
    pub status: Option<ProjectStatus>,
}

impl ProjectFilter {
    /// Filter that matches every record
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With category
    #[inline]
    #[must_use]
    pub fn with_category(mut self, category: ProjectCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// With tag
    #[inline]
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// With status
    #[inline]
    #[must_use]
    pub fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// True when no dimension is set
    #[inline]
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.category.is_none() && self.tag.is_none() && self.status.is_none()
    }

    /// Test a single record
    #[must_use]
    pub fn matches(&self, record: &ProjectRecord) -> bool {
        if self.category.is_some_and(|c| c != record.category) {
            return false;
        }
        if self.status.is_some_and(|s| s != record.status) {
            return false;
        }
        match &self.tag {
            Some(tag) => record.has_tag(tag),
            None => true,
        }
    }
}
