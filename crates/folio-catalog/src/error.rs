//! Error types for record construction
//!
//! Covers the ways raw text can fail to become a canonical record:
//! - Enumerated fields holding values outside their closed set
//! - Required fields that are missing or blank
//! - Bundled catalog text that is not valid JSON

/// Errors raised while building or validating a [`ProjectRecord`](crate::ProjectRecord)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// Category text is not one of the known categories
    #[error("unknown project category: '{0}'")]
    UnknownCategory(String),

    /// Status text is not one of the known statuses
    #[error("unknown project status: '{0}'")]
    UnknownStatus(String),

    /// A required field is absent or blank
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Catalog JSON could not be decoded
    #[error("invalid catalog data: {0}")]
    InvalidCatalog(String),
}

impl RecordError {
    /// Name of the offending field, when the error is tied to one
    #[inline]
    #[must_use]
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::UnknownCategory(_) => Some("category"),
            Self::UnknownStatus(_) => Some("status"),
            Self::MissingField(field) => Some(field),
            Self::InvalidCatalog(_) => None,
        }
    }
}
