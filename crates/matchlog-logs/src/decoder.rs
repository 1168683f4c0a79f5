//! The decoder seam shared by both log kinds.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{LogError, LogResult};
use crate::filename::{LogFileName, LogKind};

/// Turns one log's text into rows.
pub trait LogDecoder {
    type Row: Serialize;

    fn kind(&self) -> LogKind;

    /// Decode already-loaded text. Lines that do not fit the grammar are
    /// skipped.
    fn decode_str(&self, ids: &LogFileName, text: &str) -> Vec<Self::Row>;

    /// Read and decode a file. Ids come from the file name; a name that
    /// fits neither naming scheme decodes with empty ids.
    fn decode_file(&self, path: &Path) -> LogResult<Vec<Self::Row>> {
        let bytes = std::fs::read(path).map_err(|e| LogError::read(path, e))?;
        let text = String::from_utf8_lossy(&bytes);
        let ids = LogFileName::parse(path, self.kind()).unwrap_or_else(|| {
            warn!(path = %path.display(), "Could not read match/session ids from file name");
            LogFileName::default()
        });
        let rows = self.decode_str(&ids, &text);
        debug!(path = %path.display(), rows = rows.len(), "Decoded log");
        Ok(rows)
    }
}
