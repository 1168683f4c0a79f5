//! `parse`: decode downloaded logs into JSON rows.

use std::path::PathBuf;

use anyhow::Result;
use matchlog_logs::{ChatLogDecoder, CombatLogDecoder, LogDecoder};
use serde_json::Value;

use crate::commands::LogKindArg;
use crate::error::CliError;

/// Decode every file in order into one array of rows.
pub fn decode_all<D: LogDecoder>(decoder: &D, files: &[PathBuf]) -> Result<Vec<Value>> {
    let mut rows = Vec::new();
    for file in files {
        let decoded = decoder.decode_file(file).map_err(CliError::from)?;
        for row in decoded {
            rows.push(serde_json::to_value(row)?);
        }
    }
    Ok(rows)
}

pub fn execute(kind: LogKindArg, files: &[PathBuf]) -> Result<()> {
    let rows = match kind {
        LogKindArg::Combat => decode_all(&CombatLogDecoder::new(), files)?,
        LogKindArg::Chat => decode_all(&ChatLogDecoder::new(), files)?,
    };
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_all_concatenates_files_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("M1_ChatLog_S1.log");
        let second = dir.path().join("M2_ChatLog_S2.log");
        std::fs::write(
            &first,
            "Starting Chat log\nSender Id: AA -- Is only for TeamId: 1 -- MESSAGE: hi\n",
        )
        .unwrap();
        std::fs::write(
            &second,
            "Sender Id: BB -- Is only for TeamId: 2 -- MESSAGE: yo\n",
        )
        .unwrap();

        let rows = decode_all(&ChatLogDecoder::new(), &[first, second]).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["match_id"], "M1");
        assert_eq!(rows[1]["message"], "yo");
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = decode_all(&CombatLogDecoder::new(), &[PathBuf::from("/nope/CombatLog_S1.log")])
            .unwrap_err();
        assert_eq!(crate::error::exit_code_for(&err), 66);
    }
}
