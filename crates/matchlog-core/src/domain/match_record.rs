//! The subset of a backend match record needed to select matches.

use serde::{Deserialize, Serialize};

/// One game instance hosted for a match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchInstance {
    #[serde(default)]
    pub region_id: Option<String>,
    #[serde(default)]
    pub game_mode: Option<String>,
    #[serde(default)]
    pub host_type: Option<String>,
    #[serde(default)]
    pub map: Option<String>,
}

/// One session within a match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSession {
    pub session_id: String,
}

/// A match as returned by the match service (unknown fields are ignored).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub match_id: String,
    #[serde(default)]
    pub duration_seconds: Option<u64>,
    #[serde(default)]
    pub instances: Vec<MatchInstance>,
    #[serde(default)]
    pub sessions: Vec<MatchSession>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MatchList {
    Bare(Vec<MatchRecord>),
    Paged { matches: Vec<MatchRecord> },
}

impl MatchRecord {
    /// The instance used for filtering (typically the only one).
    #[must_use]
    pub fn primary_instance(&self) -> Option<&MatchInstance> {
        self.instances.first()
    }

    /// First session id, used as a hint when selecting session files.
    #[must_use]
    pub fn first_session_id(&self) -> Option<&str> {
        self.sessions.first().map(|s| s.session_id.as_str())
    }

    /// Parse exported match records: either a bare JSON array or a page
    /// object with a `matches` array.
    pub fn parse_list(json: &str) -> Result<Vec<Self>, serde_json::Error> {
        let list: MatchList = serde_json::from_str(json)?;
        Ok(match list {
            MatchList::Bare(matches) | MatchList::Paged { matches } => matches,
        })
    }
}
