//! Per-file download failures.

use std::path::{Path, PathBuf};

use matchlog_api::ApiError;
use matchlog_core::RetrievalError;
use thiserror::Error;

/// Result type alias for single-file transfers.
pub type DownloadResult<T> = Result<T, DownloadError>;

/// A single file's transfer failed. The target path is always retained.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The request or the body stream failed.
    #[error("Download of {} failed: {message}", .path.display())]
    Transport {
        /// Target path of the transfer
        path: PathBuf,
        /// Transport error message
        message: String,
        /// HTTP status, when the server answered with one
        status: Option<u16>,
    },

    /// The stream ended before the announced length was received.
    #[error("Download of {} truncated: got {received} of {expected} bytes", .path.display())]
    Truncated {
        path: PathBuf,
        received: u64,
        expected: u64,
    },

    /// Creating directories or writing the file failed.
    #[error("I/O error writing {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DownloadError {
    pub(crate) fn transport(path: &Path, err: &ApiError) -> Self {
        Self::Transport {
            path: path.to_path_buf(),
            message: err.to_string(),
            status: err.status(),
        }
    }

    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// The target path the failed transfer was writing to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Transport { path, .. } | Self::Truncated { path, .. } | Self::Io { path, .. } => {
                path
            }
        }
    }
}

impl From<DownloadError> for RetrievalError {
    fn from(err: DownloadError) -> Self {
        Self::Download {
            path: err.path().to_path_buf(),
            message: err.to_string(),
        }
    }
}
