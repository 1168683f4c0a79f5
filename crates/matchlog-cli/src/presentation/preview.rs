//! Head-of-file previews for downloaded text files.

use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Lines shown per file.
pub const PREVIEW_LINES: usize = 10;

const TEXT_EXTENSIONS: &[&str] = &["log", "json", "txt", "csv"];

pub fn is_text_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| TEXT_EXTENSIONS.iter().any(|t| t.eq_ignore_ascii_case(ext)))
}

/// Up to `limit` lines from the start of `path`; invalid UTF-8 is replaced.
pub fn head_lines(path: &Path, limit: usize) -> io::Result<Vec<String>> {
    let reader = BufReader::new(std::fs::File::open(path)?);
    let mut lines = Vec::with_capacity(limit);
    for line in reader.split(b'\n').take(limit) {
        let line = line?;
        let text = String::from_utf8_lossy(&line);
        lines.push(text.trim_end_matches('\r').to_string());
    }
    Ok(lines)
}

/// Print previews for `paths` in the given order, skipping binary files.
pub fn print_previews(paths: &[impl AsRef<Path>]) {
    for path in paths {
        let path = path.as_ref();
        if !is_text_file(path) {
            continue;
        }
        println!("==> {} <==", path.display());
        match head_lines(path, PREVIEW_LINES) {
            Ok(lines) => lines.iter().for_each(|l| println!("{l}")),
            Err(e) => println!("(could not read: {e})"),
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_head_lines_stops_at_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("CombatLog_S1.log");
        let body: String = (0..25).map(|i| format!("line {i}\r\n")).collect();
        std::fs::write(&path, body).unwrap();

        let lines = head_lines(&path, PREVIEW_LINES).unwrap();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "line 0");
        assert_eq!(lines[9], "line 9");
    }

    #[test]
    fn test_short_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.json");
        std::fs::write(&path, "{}").unwrap();
        assert_eq!(head_lines(&path, PREVIEW_LINES).unwrap(), vec!["{}"]);
    }

    #[test]
    fn test_text_detection() {
        assert!(is_text_file(Path::new("ChatLog_S1.LOG")));
        assert!(is_text_file(Path::new("MatchSummary_S1.json")));
        assert!(!is_text_file(Path::new("replay.bin")));
        assert!(!is_text_file(Path::new("noext")));
    }
}
