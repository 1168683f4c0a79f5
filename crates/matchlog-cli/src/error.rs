//! CLI error type and exit code mapping.

use matchlog_api::ApiError;
use matchlog_core::{RetrievalError, TokenError};
use matchlog_logs::LogError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Match or file does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Argument validation error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// A file could not be downloaded or written.
    #[error("Download failed: {0}")]
    Download(String),

    /// The backend failed or could not be reached.
    #[error("Service error: {0}")]
    Upstream(String),

    /// Configuration error (missing token, bad base URL).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Local IO error.
    #[error("IO error: {0}")]
    Io(String),
}

impl CliError {
    /// Map error to an exit code, following sysexits.h where one fits.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound(_) => 66,  // EX_NOINPUT
            Self::Arguments(_) => 2,  // EX_USAGE
            Self::Download(_) => 74,  // EX_IOERR
            Self::Upstream(_) => 69,  // EX_UNAVAILABLE
            Self::Config(_) => 78,    // EX_CONFIG
            Self::Io(_) => 74,        // EX_IOERR
        }
    }
}

impl From<RetrievalError> for CliError {
    fn from(err: RetrievalError) -> Self {
        let message = err.to_string();
        match err {
            RetrievalError::MatchNotFound { .. } | RetrievalError::FileNotFound { .. } => {
                Self::NotFound(message)
            }
            RetrievalError::InvalidArgument(msg) => Self::Arguments(msg),
            RetrievalError::Download { .. } => Self::Download(message),
            RetrievalError::Upstream { .. } => Self::Upstream(message),
        }
    }
}

impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::InvalidUrl(e) => Self::Config(format!("invalid base URL: {e}")),
            other => Self::Upstream(other.to_string()),
        }
    }
}

impl From<TokenError> for CliError {
    fn from(err: TokenError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<LogError> for CliError {
    fn from(err: LogError) -> Self {
        match err {
            LogError::NotFound { .. } => Self::NotFound(err.to_string()),
            LogError::Io { .. } => Self::Io(err.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Exit code for an error that reached `main`.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| {
            if let Some(cli) = cause.downcast_ref::<CliError>() {
                return Some(cli.exit_code());
            }
            cause
                .downcast_ref::<RetrievalError>()
                .map(|r| CliError::from(r.clone()).exit_code())
        })
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_retrieval_errors_map_to_exit_codes() {
        let missing = CliError::from(RetrievalError::MatchNotFound {
            match_id: "M1".to_string(),
        });
        assert_eq!(missing.exit_code(), 66);
        assert_eq!(missing.to_string(), "Match 'M1' not found");

        let bad = CliError::from(RetrievalError::InvalidArgument("nope".to_string()));
        assert_eq!(bad.exit_code(), 2);

        let upstream = CliError::from(RetrievalError::Upstream {
            message: "boom".to_string(),
            status: Some(500),
        });
        assert_eq!(upstream.exit_code(), 69);
    }

    #[test]
    fn test_exit_code_through_context() {
        let err = Err::<(), _>(RetrievalError::file_not_found("M1", "CHAT_LOG files"))
            .context("get failed")
            .unwrap_err();
        assert_eq!(exit_code_for(&err), 66);

        let plain = anyhow::anyhow!("something else");
        assert_eq!(exit_code_for(&plain), 1);
    }
}
