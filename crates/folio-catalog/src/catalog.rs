//! Static project catalog
//!
//! The bundled dataset compiled into the binary, plus pure query helpers.
//! Nothing here performs I/O or mutates after construction.

use crate::error::RecordError;
use crate::filter::ProjectFilter;
use crate::record::{ProjectCategory, ProjectRecord, ProjectStatus};
use once_cell::sync::Lazy;
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

const BUNDLED_PROJECTS: &str = include_str!("../data/projects.json");

static BUNDLED: Lazy<Arc<Catalog>> = Lazy::new(|| match Catalog::from_json(BUNDLED_PROJECTS) {
    Ok(catalog) => Arc::new(catalog),
    Err(err) => {
        tracing::error!(error = %err, "bundled project catalog is unreadable");
        Arc::default()
    }
});

/// Immutable, ordered set of project records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    records: Vec<ProjectRecord>,
}

impl Catalog {
    /// The catalog shipped with the crate
    ///
    /// Parsed once; every call shares the same allocation.
    #[inline]
    #[must_use]
    pub fn bundled() -> Arc<Catalog> {
        Arc::clone(&BUNDLED)
    }

    /// Build from records, dropping invalid entries and repeated ids
    ///
    /// The first record with a given id wins.
    #[must_use]
    pub fn from_records(records: impl IntoIterator<Item = ProjectRecord>) -> Self {
        let mut seen = HashSet::new();
        let records = records
            .into_iter()
            .filter(|record| match record.validate() {
                Ok(()) => true,
                Err(err) => {
                    tracing::warn!(project_id = %record.id, error = %err, "skipping invalid catalog record");
                    false
                }
            })
            .filter(|record| {
                let fresh = seen.insert(record.id.clone());
                if !fresh {
                    tracing::warn!(project_id = %record.id, "skipping duplicate catalog record");
                }
                fresh
            })
            .collect();
        Self { records }
    }

    /// Parse a JSON array of records
    ///
    /// Only a document that is not an array fails. Elements that do not
    /// decode are skipped one by one, then [`Catalog::from_records`] applies.
    pub fn from_json(json: &str) -> Result<Self, RecordError> {
        let entries: Vec<serde_json::Value> =
            serde_json::from_str(json).map_err(|e| RecordError::InvalidCatalog(e.to_string()))?;
        let records = entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value::<ProjectRecord>(entry) {
                Ok(record) => Some(record),
                Err(err) => {
                    tracing::warn!(index, error = %err, "skipping undecodable catalog record");
                    None
                }
            });
        Ok(Self::from_records(records))
    }

    /// All records in catalog order
    #[inline]
    #[must_use]
    pub fn records(&self) -> &[ProjectRecord] {
        &self.records
    }

    /// Iterate records in catalog order
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, ProjectRecord> {
        self.records.iter()
    }

    /// Number of records
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the catalog holds nothing
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by id
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&ProjectRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Records in `category`, order preserved
    #[must_use]
    pub fn by_category(&self, category: ProjectCategory) -> Vec<ProjectRecord> {
        self.filter(&ProjectFilter::new().with_category(category))
    }

    /// Records with `status`, order preserved
    #[must_use]
    pub fn by_status(&self, status: ProjectStatus) -> Vec<ProjectRecord> {
        self.filter(&ProjectFilter::new().with_status(status))
    }

    /// Distinct categories in first-seen order
    #[must_use]
    pub fn categories(&self) -> Vec<ProjectCategory> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(|r| r.category)
            .filter(|c| seen.insert(*c))
            .collect()
    }

    /// Distinct tags, sorted ascending
    #[must_use]
    pub fn tags(&self) -> Vec<String> {
        self.records
            .iter()
            .flat_map(|r| r.tags.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Records matching every set dimension of `filter`, order preserved
    #[must_use]
    pub fn filter(&self, filter: &ProjectFilter) -> Vec<ProjectRecord> {
        self.records
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a ProjectRecord;
    type IntoIter = std::slice::Iter<'a, ProjectRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
