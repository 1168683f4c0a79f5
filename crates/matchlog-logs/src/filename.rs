//! Identifiers carried in log file names.
//!
//! Downloaded logs are named either `{Kind}_{session_id}.log` (bare) or
//! `{match_id}_{Kind}_{session_id}.log` (batch downloads).

use std::path::Path;

use matchlog_core::FileType;

/// The two decodable log kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogKind {
    Combat,
    Chat,
}

impl LogKind {
    #[must_use]
    pub const fn file_type(self) -> FileType {
        match self {
            Self::Combat => FileType::CombatLog,
            Self::Chat => FileType::ChatLog,
        }
    }

    /// `CombatLog` / `ChatLog`, as it appears between underscores.
    #[must_use]
    pub fn marker(self) -> &'static str {
        self.file_type()
            .prefix()
            .map_or("", |p| p.trim_end_matches('_'))
    }
}

/// Match and session ids recovered from a log file name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogFileName {
    pub match_id: Option<String>,
    pub session_id: Option<String>,
}

impl LogFileName {
    /// Parse `path`'s file stem for `kind`.
    ///
    /// Returns `None` when the kind marker is not where either naming
    /// scheme puts it.
    #[must_use]
    pub fn parse(path: &Path, kind: LogKind) -> Option<Self> {
        let stem = path.file_stem()?.to_str()?;
        let parts: Vec<&str> = stem.split('_').collect();
        let marker = kind.marker();

        let (match_id, rest) = match parts.as_slice() {
            [first, rest @ ..] if *first == marker => (None, rest),
            [first, second, rest @ ..] if *second == marker => (Some(*first), rest),
            _ => return None,
        };
        if rest.is_empty() {
            return None;
        }
        Some(Self {
            match_id: match_id.map(str::to_string),
            session_id: Some(rest.join("_")),
        })
    }
}
