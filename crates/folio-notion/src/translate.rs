//! Page to record translation
//!
//! Column names of the projects database and the rules for turning a page
//! into a [`ProjectRecord`]. A page missing title, description, category or
//! status (or holding an unknown category/status) is rejected. Unparsable
//! `Metrics` / `Highlights` only empty that field.

use crate::schema::Page;
use folio_catalog::{
    Metric, ProjectCategory, ProjectLinks, ProjectRecord, ProjectStatus, RecordError, DEFAULT_ICON_NAME,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashSet;

pub mod columns {
    //! Property names as they appear in the projects database
    /// `Title`
    pub const TITLE: &str = "Title";
    /// `Description`
    pub const DESCRIPTION: &str = "Description";
    /// `Long Description`
    pub const LONG_DESCRIPTION: &str = "Long Description";
    /// `Category`
    pub const CATEGORY: &str = "Category";
    /// `Status`
    pub const STATUS: &str = "Status";
    /// `Year`
    pub const YEAR: &str = "Year";
    /// `Icon`
    pub const ICON: &str = "Icon";
    /// `Tags`
    pub const TAGS: &str = "Tags";
    /// `Technologies`
    pub const TECHNOLOGIES: &str = "Technologies";
    /// `Team`
    pub const TEAM: &str = "Team";
    /// `Demo Link`
    pub const DEMO_LINK: &str = "Demo Link";
    /// `Website Link`
    pub const WEBSITE_LINK: &str = "Website Link";
    /// `GitHub Link`
    pub const GITHUB_LINK: &str = "GitHub Link";
    /// `Metrics`
    pub const METRICS: &str = "Metrics";
    /// `Highlights`
    pub const HIGHLIGHTS: &str = "Highlights";
}

/// Metric as stored in the `Metrics` column; values may be numbers
#[derive(Debug, Deserialize)]
struct StoredMetric {
    label: String,
    value: serde_json::Value,
}

impl From<StoredMetric> for Metric {
    fn from(stored: StoredMetric) -> Self {
        let value = match stored.value {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };
        Metric::new(stored.label, value)
    }
}

/// Translate one page
///
/// `current_year` fills in a missing `Year`.
pub fn page_to_record(page: &Page, current_year: i32) -> Result<ProjectRecord, RecordError> {
    let title = page.text(columns::TITLE).ok_or(RecordError::MissingField("title"))?;
    let description = page
        .text(columns::DESCRIPTION)
        .ok_or(RecordError::MissingField("description"))?;
    let category: ProjectCategory = page
        .text(columns::CATEGORY)
        .ok_or(RecordError::MissingField("category"))?
        .parse()?;
    let status: ProjectStatus = page
        .text(columns::STATUS)
        .ok_or(RecordError::MissingField("status"))?
        .parse()?;

    let metrics: Vec<Metric> = parse_structured::<Vec<StoredMetric>>(page, columns::METRICS)
        .unwrap_or_default()
        .into_iter()
        .map(Metric::from)
        .collect();
    let highlights = parse_structured::<Vec<String>>(page, columns::HIGHLIGHTS).unwrap_or_default();

    let links = ProjectLinks {
        demo: page.text(columns::DEMO_LINK),
        website: page.text(columns::WEBSITE_LINK),
        github: page.text(columns::GITHUB_LINK),
    };

    let mut record = ProjectRecord::new(page.id.clone(), title, description, category, status, year(page, current_year))
        .with_tags(page.list(columns::TAGS))
        .with_icon(page.text(columns::ICON).unwrap_or_else(|| DEFAULT_ICON_NAME.to_string()))
        .with_metrics(metrics)
        .with_highlights(highlights);
    if let Some(long) = page.text(columns::LONG_DESCRIPTION) {
        record = record.with_long_description(long);
    }
    record.technologies = page.list(columns::TECHNOLOGIES);
    record.links = links.into_option();
    record.team = page.text(columns::TEAM);

    record.validate()?;
    Ok(record)
}

/// Translate a batch, dropping invalid pages and repeated ids
pub fn pages_to_records<'a>(pages: impl IntoIterator<Item = &'a Page>, current_year: i32) -> Vec<ProjectRecord> {
    let mut seen = HashSet::new();
    pages
        .into_iter()
        .filter_map(|page| match page_to_record(page, current_year) {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::warn!(page_id = %page.id, error = %err, "dropping incomplete project page");
                None
            }
        })
        .filter(|record| seen.insert(record.id.clone()))
        .collect()
}

#[allow(clippy::cast_possible_truncation)]
fn year(page: &Page, current_year: i32) -> i32 {
    page.number(columns::YEAR)
        .filter(|n| n.is_finite() && *n >= 1.0 && *n <= f64::from(i32::MAX))
        .map_or(current_year, |n| n as i32)
}

/// JSON stored in a text column; failures are logged and yield `None`
fn parse_structured<T: DeserializeOwned>(page: &Page, column: &'static str) -> Option<T> {
    let raw = page.text(column)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(page_id = %page.id, column, error = %err, "ignoring unparsable structured field");
            None
        }
    }
}
