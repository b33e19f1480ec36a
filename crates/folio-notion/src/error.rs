//! Error types for the Notion adapter

use folio_core::SourceError;

/// Errors talking to the Notion API
#[derive(Debug, thiserror::Error)]
pub enum NotionError {
    /// Request could not be sent or completed
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// API answered with a non-success status
    #[error("notion returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },

    /// Response body is not the expected shape
    #[error("unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),

    /// Client could not be built from the configuration
    #[error("configuration error: {0}")]
    Config(String),
}

impl NotionError {
    /// Create status error
    #[inline]
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }
}

impl From<NotionError> for SourceError {
    fn from(err: NotionError) -> Self {
        match err {
            NotionError::Http(e) if e.is_decode() => SourceError::Decode(e.to_string()),
            NotionError::Http(e) => SourceError::Transport(e.to_string()),
            NotionError::Status { status, body } => SourceError::Status { status, body },
            NotionError::Decode(e) => SourceError::Decode(e.to_string()),
            NotionError::Config(msg) => SourceError::Unexpected(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_maps_to_source_status() {
        let err: SourceError = NotionError::status(401, "unauthorized").into();
        assert_eq!(err, SourceError::status(401, "unauthorized"));
    }

    #[test]
    fn decode_maps_to_source_decode() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: SourceError = NotionError::from(json_err).into();
        assert!(matches!(err, SourceError::Decode(_)));
    }
}
