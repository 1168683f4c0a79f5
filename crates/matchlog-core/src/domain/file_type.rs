//! File type classification and storage endpoints.
//!
//! Classification is a pure function of the remote filename: the same name
//! always yields the same [`FileType`], and at most one typed pattern can
//! match because every pattern is an anchored prefix plus a fixed extension.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

// ============================================================================
// Endpoint
// ============================================================================

/// Storage namespace on the backend that holds match files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Endpoint {
    /// The regular file namespace (`file`).
    #[serde(rename = "file")]
    Primary,
    /// The developer file namespace (`developer-file`).
    #[serde(rename = "developer-file")]
    Developer,
}

impl Endpoint {
    /// Every endpoint, in listing order.
    pub const ALL: [Self; 2] = [Self::Primary, Self::Developer];

    /// The literal URL path segment for this endpoint.
    #[must_use]
    pub const fn as_path_segment(&self) -> &'static str {
        match self {
            Self::Primary => "file",
            Self::Developer => "developer-file",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_path_segment())
    }
}

impl FromStr for Endpoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" | "primary" => Ok(Self::Primary),
            "developer-file" | "developer" => Ok(Self::Developer),
            other => Err(format!(
                "unknown endpoint '{other}' (expected 'file' or 'developer-file')"
            )),
        }
    }
}

// ============================================================================
// File Type
// ============================================================================

/// Semantic type of a match file, derived from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileType {
    CombatLog,
    ChatLog,
    ConsoleLog,
    GameSessionSummary,
    MatchSummary,
    ServerMetadata,
    Unknown,
}

/// Filename patterns, one per typed variant, evaluated in order.
static FILE_TYPE_PATTERNS: LazyLock<Vec<(FileType, Regex)>> = LazyLock::new(|| {
    [
        (FileType::CombatLog, r"(?i)^CombatLog_.*\.log$"),
        (FileType::ChatLog, r"(?i)^ChatLog_.*\.log$"),
        (FileType::ConsoleLog, r"(?i)^ConsoleLog_.*\.log$"),
        (FileType::GameSessionSummary, r"(?i)^GameSessionSummary_.*\.json$"),
        (FileType::MatchSummary, r"(?i)^MatchSummary_.*\.json$"),
        (FileType::ServerMetadata, r"(?i)^ServerMetadata_.*\.json$"),
    ]
    .into_iter()
    .map(|(file_type, pattern)| {
        (
            file_type,
            Regex::new(pattern).expect("file type pattern is valid"),
        )
    })
    .collect()
});

/// Prefixes whose remainder may carry a session id.
pub const SESSION_PREFIXES: &[&str] = &["CombatLog_", "ChatLog_", "ConsoleLog_"];

/// Length of a hyphenated UUID.
const UUID_LEN: usize = 36;

impl FileType {
    /// Every classifiable type (excludes [`FileType::Unknown`]).
    pub const KNOWN: [Self; 6] = [
        Self::CombatLog,
        Self::ChatLog,
        Self::ConsoleLog,
        Self::GameSessionSummary,
        Self::MatchSummary,
        Self::ServerMetadata,
    ];

    /// Get the canonical string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CombatLog => "COMBAT_LOG",
            Self::ChatLog => "CHAT_LOG",
            Self::ConsoleLog => "CONSOLE_LOG",
            Self::GameSessionSummary => "GAME_SESSION_SUMMARY",
            Self::MatchSummary => "MATCH_SUMMARY",
            Self::ServerMetadata => "SERVER_METADATA",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Filename prefix for this type, as written by the game server.
    #[must_use]
    pub const fn prefix(&self) -> Option<&'static str> {
        match self {
            Self::CombatLog => Some("CombatLog_"),
            Self::ChatLog => Some("ChatLog_"),
            Self::ConsoleLog => Some("ConsoleLog_"),
            Self::GameSessionSummary => Some("GameSessionSummary_"),
            Self::MatchSummary => Some("MatchSummary_"),
            Self::ServerMetadata => Some("ServerMetadata_"),
            Self::Unknown => None,
        }
    }

    /// File extension (without the dot) for this type.
    #[must_use]
    pub const fn extension(&self) -> Option<&'static str> {
        match self {
            Self::CombatLog | Self::ChatLog | Self::ConsoleLog => Some("log"),
            Self::GameSessionSummary | Self::MatchSummary | Self::ServerMetadata => Some("json"),
            Self::Unknown => None,
        }
    }

    /// The canonical filename for one session of this type, e.g.
    /// `CombatLog_<session>.log`.
    #[must_use]
    pub fn session_file_name(&self, session_id: &str) -> Option<String> {
        Some(format!("{}{session_id}.{}", self.prefix()?, self.extension()?))
    }

    /// Endpoints expected to host files of this type.
    #[must_use]
    pub const fn endpoints(&self) -> &'static [Endpoint] {
        endpoints_for(*self)
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase().replace('-', "_");
        Self::KNOWN
            .into_iter()
            .chain([Self::Unknown])
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::KNOWN.iter().map(Self::as_str).collect();
                format!("unknown file type '{s}' (expected one of {})", valid.join(", "))
            })
    }
}

/// Map a remote filename to its [`FileType`].
///
/// Returns [`FileType::Unknown`] when no pattern matches, including for the
/// empty string.
#[must_use]
pub fn classify(name: &str) -> FileType {
    FILE_TYPE_PATTERNS
        .iter()
        .find(|(_, pattern)| pattern.is_match(name))
        .map_or(FileType::Unknown, |(file_type, _)| *file_type)
}

/// Endpoints that typically host `file_type`.
///
/// Chat logs only ever live on the developer endpoint; every other type has
/// moved between endpoints across backend versions, so both are searched.
#[must_use]
pub const fn endpoints_for(file_type: FileType) -> &'static [Endpoint] {
    match file_type {
        FileType::ChatLog => &[Endpoint::Developer],
        _ => &Endpoint::ALL,
    }
}

/// Parse a session id out of a filename.
///
/// Strips the first matching prefix from `prefixes` (ASCII case-insensitive)
/// and everything from the first `.` onward; the remainder is returned only
/// when its length is that of a UUID. Used only when listing metadata lacks
/// an explicit session id.
#[must_use]
pub fn extract_session_id(name: &str, prefixes: &[&str]) -> Option<String> {
    prefixes.iter().find_map(|prefix| {
        let head = name.get(..prefix.len())?;
        if !head.eq_ignore_ascii_case(prefix) {
            return None;
        }
        let rest = &name[prefix.len()..];
        let stem = rest.split('.').next().unwrap_or(rest);
        (stem.len() == UUID_LEN).then(|| stem.to_string())
    })
}
