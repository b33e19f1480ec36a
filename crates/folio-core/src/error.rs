//! Error types for project sources
//!
//! A [`SourceError`] is always absorbed by the feed; it decides which
//! fallback narrative the caller sees, never whether the caller gets data.

/// Failure of a remote project query
///
/// `Clone` so a single in-flight failure can be handed to every caller that
/// was waiting on the same cache refresh.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    /// Network-level failure (connect, TLS, timeout)
    #[error("transport error: {0}")]
    Transport(String),

    /// Backend answered with a non-success status
    #[error("backend returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, possibly truncated
        body: String,
    },

    /// Response body could not be decoded as a batch
    #[error("decode error: {0}")]
    Decode(String),

    /// Anything else, including a panic inside the fetch
    #[error("unexpected failure: {0}")]
    Unexpected(String),
}

impl SourceError {
    /// Create status error
    #[inline]
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    /// Check if a later attempt could plausibly succeed
    #[inline]
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::Decode(_) | Self::Unexpected(_) => false,
        }
    }
}

/// Result of a listing query against a source
pub type SourceResult<T> = Result<T, SourceError>;
