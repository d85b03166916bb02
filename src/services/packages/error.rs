//! Error types for the package source clients

use thiserror::Error;

/// Package source client error type
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP status {0}")]
    Status(reqwest::StatusCode),

    #[error("{0}")]
    Api(String),

    #[error("Invalid response format: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid search query: {0}")]
    InvalidQuery(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Result type for package source operations
pub type SourceResult<T> = Result<T, SourceError>;

impl SourceError {
    pub fn api_error(message: impl Into<String>) -> Self {
        Self::Api(message.into())
    }

    /// Check if error is transient and worth retrying on the next keystroke
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Status(status) => {
                status.is_server_error() || *status == reqwest::StatusCode::TOO_MANY_REQUESTS
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_displays_message_verbatim() {
        let err = SourceError::api_error("Too many package results.");
        assert_eq!(err.to_string(), "Too many package results.");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_status_recoverability() {
        assert!(SourceError::Status(reqwest::StatusCode::BAD_GATEWAY).is_recoverable());
        assert!(SourceError::Status(reqwest::StatusCode::TOO_MANY_REQUESTS).is_recoverable());
        assert!(!SourceError::Status(reqwest::StatusCode::NOT_FOUND).is_recoverable());
    }
}
