//! Caller-visible error taxonomy for match file retrieval.
//!
//! Per-file download failures inside a batch never surface here: they are
//! logged and the file is left out of the result.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for retrieval operations.
pub type RetrievalResult<T> = Result<T, RetrievalError>;

/// Errors returned by the retrieval facade and its building blocks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RetrievalError {
    /// The match id is unknown to the backend. Fatal to the whole call.
    #[error("Match '{match_id}' not found")]
    MatchNotFound {
        /// The match id that was looked up
        match_id: String,
    },

    /// The match exists but nothing matched the requested type or filter.
    #[error("No {what} found for match '{match_id}'")]
    FileNotFound {
        /// The match id that was searched
        match_id: String,
        /// Description of what was requested
        what: String,
    },

    /// A caller-supplied argument was not recognised.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A single-file transfer failed.
    #[error("Download to {} failed: {message}", .path.display())]
    Download {
        /// Target path of the failed transfer
        path: PathBuf,
        /// Underlying transport or I/O message
        message: String,
    },

    /// Unclassified upstream fault, propagated without retry.
    #[error("Upstream error: {message}")]
    Upstream {
        /// Message from the transport layer
        message: String,
        /// HTTP status, when the fault was a non-success response
        status: Option<u16>,
    },
}

impl RetrievalError {
    /// Shorthand for [`RetrievalError::FileNotFound`].
    pub fn file_not_found(match_id: impl Into<String>, what: impl Into<String>) -> Self {
        Self::FileNotFound {
            match_id: match_id.into(),
            what: what.into(),
        }
    }

    /// True for the errors that mean "nothing to fetch" rather than a fault.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::MatchNotFound { .. } | Self::FileNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_not_found_message() {
        let err = RetrievalError::MatchNotFound {
            match_id: "M1".to_string(),
        };
        assert_eq!(err.to_string(), "Match 'M1' not found");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_file_not_found_message() {
        let err = RetrievalError::file_not_found("M1", "SERVER_METADATA files");
        let msg = err.to_string();
        assert!(msg.contains("SERVER_METADATA"));
        assert!(msg.contains("M1"));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_download_message_includes_path() {
        let err = RetrievalError::Download {
            path: PathBuf::from("out/ChatLog_S1.log"),
            message: "connection reset".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("out/ChatLog_S1.log"));
        assert!(msg.contains("connection reset"));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_upstream_is_a_fault() {
        let err = RetrievalError::Upstream {
            message: "forbidden".to_string(),
            status: Some(403),
        };
        assert!(!err.is_not_found());
    }
}
