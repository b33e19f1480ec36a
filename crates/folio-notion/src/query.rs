//! Database query bodies
//!
//! Every query excludes archived projects and sorts by `Year`, newest first.

use crate::translate::columns;
use folio_catalog::{ProjectCategory, ProjectStatus};
use serde_json::{json, Value};
use std::fmt;

/// What to list from the projects database
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProjectQuery {
    /// All non-archived projects
    All,
    /// Non-archived projects in a category
    Category(ProjectCategory),
    /// Non-archived projects carrying a tag
    Tag(String),
}

impl ProjectQuery {
    /// Filter object for this query
    #[must_use]
    pub fn filter(&self) -> Value {
        let not_archived = json!({
            "property": columns::STATUS,
            "select": { "does_not_equal": ProjectStatus::Archived.as_str() },
        });
        match self {
            Self::All => not_archived,
            Self::Category(category) => json!({
                "and": [
                    { "property": columns::CATEGORY, "select": { "equals": category.as_str() } },
                    not_archived,
                ]
            }),
            Self::Tag(tag) => json!({
                "and": [
                    { "property": columns::TAGS, "multi_select": { "contains": tag } },
                    not_archived,
                ]
            }),
        }
    }

    /// Request body for one batch
    #[must_use]
    pub fn body(&self, page_size: u32, cursor: Option<&str>) -> Value {
        let mut body = json!({
            "filter": self.filter(),
            "sorts": [{ "property": columns::YEAR, "direction": "descending" }],
            "page_size": page_size,
        });
        if let Some(cursor) = cursor {
            body["start_cursor"] = Value::String(cursor.to_string());
        }
        body
    }
}

impl fmt::Display for ProjectQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Category(category) => write!(f, "category={category}"),
            Self::Tag(tag) => write!(f, "tag={tag}"),
        }
    }
}
