//! Internal error types for backend HTTP operations.
//!
//! These errors are internal to `matchlog-api` and are mapped to
//! [`RetrievalError`] at the boundary.

use matchlog_core::RetrievalError;
use thiserror::Error;

/// Result type alias for backend operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors related to backend API operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// API request failed with an HTTP error status.
    #[error("API request failed with status {status}: {url}")]
    ApiRequestFailed {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// API returned an invalid or unexpected response.
    #[error("Invalid response from API: {message}")]
    InvalidResponse {
        /// Description of what was invalid
        message: String,
    },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status of a failed request, if the failure was a status code.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiRequestFailed { status, .. } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True for 404 responses.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<ApiError> for RetrievalError {
    fn from(err: ApiError) -> Self {
        Self::Upstream {
            status: err.status(),
            message: err.to_string(),
        }
    }
}
