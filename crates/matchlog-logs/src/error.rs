//! Errors raised while decoding log files.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures reading a log from disk.
///
/// Malformed lines are not errors; they are skipped while decoding.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("Log file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LogError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Io { path, source }
        }
    }
}

pub type LogResult<T> = Result<T, LogError>;
