//! Canonical project record
//!
//! The normalized shape every source (remote backend or bundled catalog) is
//! translated into before it reaches a caller.

use crate::error::RecordError;
use crate::icon::DEFAULT_ICON_NAME;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Project category (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectCategory {
    /// Software-as-a-service products
    Saas,
    /// Websites and web applications
    Web,
    /// Native or cross-platform mobile apps
    Mobile,
    /// Paid traffic and ads management
    Traffic,
    /// Backend and platform infrastructure
    Infrastructure,
}

impl ProjectCategory {
    /// Every category, in declaration order
    pub const ALL: [Self; 5] = [
        Self::Saas,
        Self::Web,
        Self::Mobile,
        Self::Traffic,
        Self::Infrastructure,
    ];

    /// Wire name used by the backend and the bundled dataset
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Saas => "saas",
            Self::Web => "web",
            Self::Mobile => "mobile",
            Self::Traffic => "traffic",
            Self::Infrastructure => "infrastructure",
        }
    }

    /// Human label shown on filter controls
    #[inline]
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Saas => "SaaS",
            Self::Web => "Web",
            Self::Mobile => "Mobile",
            Self::Traffic => "Tráfego",
            Self::Infrastructure => "Infraestrutura",
        }
    }
}

impl fmt::Display for ProjectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectCategory {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| RecordError::UnknownCategory(trimmed.to_string()))
    }
}

/// Project lifecycle status (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    /// Live and in use
    Production,
    /// Still being built
    Development,
    /// Retired; never listed by remote queries
    Archived,
}

impl ProjectStatus {
    /// Every status, in declaration order
    pub const ALL: [Self; 3] = [Self::Production, Self::Development, Self::Archived];

    /// Wire name used by the backend and the bundled dataset
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Development => "development",
            Self::Archived => "archived",
        }
    }

    /// Human label shown on project cards
    #[inline]
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Production => "Em Produção",
            Self::Development => "Em Desenvolvimento",
            Self::Archived => "Arquivado",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| RecordError::UnknownStatus(trimmed.to_string()))
    }
}

/// A single labelled figure shown on a project card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    /// What is measured
    pub label: String,
    /// Display value, kept as text ("150+", "35%")
    pub value: String,
}

impl Metric {
    /// Create new metric
    #[inline]
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Named external links; absent entries are omitted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectLinks {
    /// Live demo
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo: Option<String>,
    /// Product or marketing website
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Source repository
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

impl ProjectLinks {
    /// True when no link is set
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.demo.is_none() && self.website.is_none() && self.github.is_none()
    }

    /// Collapse to `None` when every entry is absent
    #[inline]
    #[must_use]
    pub fn into_option(self) -> Option<Self> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

/// Canonical portfolio item
///
/// Immutable value object; rebuilt from scratch on every successful fetch.
/// Deserialization is lenient the way stored datasets need: category and
/// status match case-insensitively, and a missing `longDescription` falls
/// back to `description`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "StoredRecord")]
pub struct ProjectRecord {
    /// Stable identifier, unique across sources
    pub id: String,
    /// Card title
    pub title: String,
    /// One-line summary
    pub description: String,
    /// Detail text; equals `description` when the source has none
    pub long_description: String,
    /// Category
    pub category: ProjectCategory,
    /// Status
    pub status: ProjectStatus,
    /// Year the project shipped or started
    pub year: i32,
    /// Symbolic glyph name, see [`ProjectIcon`](crate::ProjectIcon)
    pub icon: String,
    /// Free-text labels, source order, duplicates kept
    pub tags: Vec<String>,
    /// Stack labels
    pub technologies: Vec<String>,
    /// Headline figures; `None` when there is nothing to show
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Vec<Metric>>,
    /// External links; `None` when there is nothing to show
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<ProjectLinks>,
    /// Client or team attribution
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    /// Bullet points for the detail view
    pub highlights: Vec<String>,
}

/// Record as written in a dataset file
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredRecord {
    id: String,
    title: String,
    description: String,
    #[serde(default)]
    long_description: Option<String>,
    category: String,
    status: String,
    year: i32,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    technologies: Vec<String>,
    #[serde(default)]
    metrics: Option<Vec<Metric>>,
    #[serde(default)]
    links: Option<ProjectLinks>,
    #[serde(default)]
    team: Option<String>,
    #[serde(default)]
    highlights: Vec<String>,
}

impl TryFrom<StoredRecord> for ProjectRecord {
    type Error = RecordError;

    fn try_from(stored: StoredRecord) -> Result<Self, Self::Error> {
        let mut record = ProjectRecord::new(
            stored.id,
            stored.title,
            stored.description,
            stored.category.parse()?,
            stored.status.parse()?,
            stored.year,
        )
        .with_tags(stored.tags)
        .with_metrics(stored.metrics.unwrap_or_default())
        .with_highlights(stored.highlights);
        if let Some(long) = stored.long_description.filter(|t| !t.trim().is_empty()) {
            record = record.with_long_description(long);
        }
        if let Some(icon) = stored.icon.filter(|i| !i.trim().is_empty()) {
            record = record.with_icon(icon);
        }
        record.technologies = stored.technologies;
        record.links = stored.links.and_then(ProjectLinks::into_option);
        record.team = stored.team;
        Ok(record)
    }
}

impl ProjectRecord {
    /// Create a record with the required fields; optional fields start empty
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        category: ProjectCategory,
        status: ProjectStatus,
        year: i32,
    ) -> Self {
        let description = description.into();
        Self {
            id: id.into(),
            title: title.into(),
            long_description: description.clone(),
            description,
            category,
            status,
            year,
            icon: DEFAULT_ICON_NAME.to_string(),
            tags: Vec::new(),
            technologies: Vec::new(),
            metrics: None,
            links: None,
            team: None,
            highlights: Vec::new(),
        }
    }

    /// With tags
    #[inline]
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// With icon name
    #[inline]
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// With long description
    #[inline]
    #[must_use]
    pub fn with_long_description(mut self, text: impl Into<String>) -> Self {
        self.long_description = text.into();
        self
    }

    /// With metrics; an empty list is stored as `None`
    #[inline]
    #[must_use]
    pub fn with_metrics(mut self, metrics: Vec<Metric>) -> Self {
        self.metrics = if metrics.is_empty() { None } else { Some(metrics) };
        self
    }

    /// With highlights
    #[inline]
    #[must_use]
    pub fn with_highlights(mut self, highlights: Vec<String>) -> Self {
        self.highlights = highlights;
        self
    }

    /// Check the required-field invariant
    ///
    /// Category and status are enforced by their types; title and description
    /// must carry non-blank text.
    pub fn validate(&self) -> Result<(), RecordError> {
        if self.id.trim().is_empty() {
            return Err(RecordError::MissingField("id"));
        }
        if self.title.trim().is_empty() {
            return Err(RecordError::MissingField("title"));
        }
        if self.description.trim().is_empty() {
            return Err(RecordError::MissingField("description"));
        }
        Ok(())
    }

    /// Whether the record carries `tag` (exact match)
    #[inline]
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}
