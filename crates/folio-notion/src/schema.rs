//! Notion wire types
//!
//! Pages carry typed properties. Extraction dispatches on the declared type
//! and flattens each into plain text, a list of names, or a number.

use serde::Deserialize;
use std::collections::HashMap;

/// Result page of a database query
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResponse {
    /// Pages in this batch
    #[serde(default)]
    pub results: Vec<Page>,
    /// More pages are available
    #[serde(default)]
    pub has_more: bool,
    /// Cursor for the next batch
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// A database row
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    /// Page id
    pub id: String,
    /// Properties keyed by column name
    #[serde(default)]
    pub properties: HashMap<String, PropertyValue>,
}

impl Page {
    /// Property by column name
    #[inline]
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    /// Text of a property, `None` when absent or blank
    #[must_use]
    pub fn text(&self, name: &str) -> Option<String> {
        self.property(name).and_then(PropertyValue::as_text)
    }

    /// Names of a multi-select property, empty when absent
    #[must_use]
    pub fn list(&self, name: &str) -> Vec<String> {
        self.property(name).map(PropertyValue::as_list).unwrap_or_default()
    }

    /// Number property
    #[must_use]
    pub fn number(&self, name: &str) -> Option<f64> {
        self.property(name).and_then(PropertyValue::as_number)
    }
}

/// A run of rich text
#[derive(Debug, Clone, Deserialize)]
pub struct RichText {
    /// Unformatted content
    #[serde(default)]
    pub plain_text: String,
}

/// Option of a select or multi-select
#[derive(Debug, Clone, Deserialize)]
pub struct SelectOption {
    /// Option name
    pub name: String,
}

/// Typed property value
///
/// Unknown property types deserialize as [`PropertyValue::Unsupported`].
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    /// Page title
    Title {
        /// Text runs
        title: Vec<RichText>,
    },
    /// Rich text
    RichText {
        /// Text runs
        rich_text: Vec<RichText>,
    },
    /// Single select
    Select {
        /// Chosen option
        select: Option<SelectOption>,
    },
    /// Multi select
    MultiSelect {
        /// Chosen options
        multi_select: Vec<SelectOption>,
    },
    /// Number
    Number {
        /// Value
        number: Option<f64>,
    },
    /// URL
    Url {
        /// Value
        url: Option<String>,
    },
    /// Checkbox
    Checkbox {
        /// Value
        checkbox: bool,
    },
    /// Any other property type
    #[serde(other)]
    Unsupported,
}

impl PropertyValue {
    /// Flatten to text: joined runs, select name, or URL
    ///
    /// Blank results are `None`.
    #[must_use]
    pub fn as_text(&self) -> Option<String> {
        let text = match self {
            Self::Title { title: runs } | Self::RichText { rich_text: runs } => {
                runs.iter().map(|t| t.plain_text.as_str()).collect::<String>()
            }
            Self::Select { select } => select.as_ref()?.name.clone(),
            Self::Url { url } => url.clone()?,
            Self::Number { number } => number.map(|n| n.to_string())?,
            Self::MultiSelect { .. } | Self::Checkbox { .. } | Self::Unsupported => return None,
        };
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Flatten to a list of option names; only multi-selects yield any
    #[must_use]
    pub fn as_list(&self) -> Vec<String> {
        match self {
            Self::MultiSelect { multi_select } => multi_select.iter().map(|o| o.name.clone()).collect(),
            _ => Vec::new(),
        }
    }

    /// Numeric value
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number { number } => *number,
            _ => None,
        }
    }

    /// Checkbox value
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Checkbox { checkbox } => Some(*checkbox),
            _ => None,
        }
    }
}
