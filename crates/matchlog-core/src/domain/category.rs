//! User-facing file categories.
//!
//! Categories do not map 1:1 onto [`FileType`](super::FileType): some
//! (diagnostics, server instance logs, performance exports) have no formal
//! type and are recognised purely by filename prefix.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::file_type::Endpoint;
use crate::error::RetrievalError;

/// A friendly category name mapped to endpoints plus a filename prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FriendlyCategory {
    ChatLog,
    CombatLog,
    Diagnostics,
    ServerLog,
    #[serde(rename = "PEX_Summary")]
    PexSummary,
    #[serde(rename = "PEX_Timeline")]
    PexTimeline,
}

impl FriendlyCategory {
    /// Every category, in the order "All" expands to.
    pub const ALL: [Self; 6] = [
        Self::ChatLog,
        Self::CombatLog,
        Self::Diagnostics,
        Self::ServerLog,
        Self::PexSummary,
        Self::PexTimeline,
    ];

    /// The name users type for this category.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ChatLog => "ChatLog",
            Self::CombatLog => "CombatLog",
            Self::Diagnostics => "Diagnostics",
            Self::ServerLog => "ServerLog",
            Self::PexSummary => "PEX_Summary",
            Self::PexTimeline => "PEX_Timeline",
        }
    }

    /// Lower-case filename prefix identifying the category.
    #[must_use]
    pub const fn prefix(&self) -> &'static str {
        match self {
            Self::ChatLog => "chatlog_",
            Self::CombatLog => "combatlog_",
            Self::Diagnostics => "diagnostics_",
            Self::ServerLog => "inst_",
            Self::PexSummary => "pex_summary_",
            Self::PexTimeline => "pex_timeline_",
        }
    }

    /// Endpoints searched for this category.
    #[must_use]
    pub const fn endpoints(&self) -> &'static [Endpoint] {
        match self {
            Self::CombatLog => &Endpoint::ALL,
            _ => &[Endpoint::Developer],
        }
    }

    /// Case-insensitive prefix test against a remote filename.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        let prefix = self.prefix();
        name.get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    }

    fn valid_names() -> String {
        Self::ALL
            .iter()
            .map(Self::name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for FriendlyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FriendlyCategory {
    type Err = RetrievalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name() == s.trim())
            .ok_or_else(|| {
                RetrievalError::InvalidArgument(format!(
                    "invalid file category '{s}': must be 'All' or one of {}",
                    Self::valid_names()
                ))
            })
    }
}

/// Which categories a retrieval call asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategorySelection {
    All,
    Only(Vec<FriendlyCategory>),
}

impl CategorySelection {
    /// Parse user-supplied names. A lone `"All"` (or no names) selects every
    /// category; any unrecognised name is an error.
    pub fn parse<S: AsRef<str>>(names: &[S]) -> Result<Self, RetrievalError> {
        match names {
            [] => Ok(Self::All),
            [only] if only.as_ref().trim() == "All" => Ok(Self::All),
            _ => names
                .iter()
                .map(|n| n.as_ref().parse())
                .collect::<Result<Vec<_>, _>>()
                .map(Self::Only),
        }
    }

    /// The concrete categories, de-duplicated, in request order.
    #[must_use]
    pub fn categories(&self) -> Vec<FriendlyCategory> {
        match self {
            Self::All => FriendlyCategory::ALL.to_vec(),
            Self::Only(list) => {
                let mut out: Vec<FriendlyCategory> = Vec::with_capacity(list.len());
                for c in list {
                    if !out.contains(c) {
                        out.push(*c);
                    }
                }
                out
            }
        }
    }

    /// Union of the endpoints the selected categories live on, in
    /// [`Endpoint::ALL`] order.
    #[must_use]
    pub fn endpoints(&self) -> Vec<Endpoint> {
        let categories = self.categories();
        Endpoint::ALL
            .into_iter()
            .filter(|e| categories.iter().any(|c| c.endpoints().contains(e)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_matching_is_case_insensitive() {
        assert!(FriendlyCategory::ChatLog.matches("ChatLog_S1.log"));
        assert!(FriendlyCategory::ServerLog.matches("Inst_1234.log"));
        assert!(FriendlyCategory::Diagnostics.matches("DIAGNOSTICS_S1.json"));
        assert!(FriendlyCategory::PexTimeline.matches("PEX_Timeline_1.csv"));
        assert!(!FriendlyCategory::PexSummary.matches("PEX_Timeline_1.csv"));
        assert!(!FriendlyCategory::ChatLog.matches("Chat"));
    }

    #[test]
    fn test_parse_all() {
        assert_eq!(CategorySelection::parse(&["All"]), Ok(CategorySelection::All));
        let empty: [&str; 0] = [];
        assert_eq!(CategorySelection::parse(&empty), Ok(CategorySelection::All));
        assert_eq!(CategorySelection::All.categories().len(), 6);
    }

    #[test]
    fn test_parse_list_and_dedup() {
        let sel = CategorySelection::parse(&["ChatLog", "Diagnostics", "ChatLog"]).unwrap();
        assert_eq!(
            sel.categories(),
            vec![FriendlyCategory::ChatLog, FriendlyCategory::Diagnostics]
        );
        assert_eq!(sel.endpoints(), vec![Endpoint::Developer]);
    }

    #[test]
    fn test_parse_rejects_unknown_names() {
        let err = CategorySelection::parse(&["ChatLog", "Replays"]).unwrap_err();
        assert!(matches!(err, RetrievalError::InvalidArgument(_)));
        assert!(err.to_string().contains("Replays"));
        assert!(err.to_string().contains("PEX_Summary"));
    }

    #[test]
    fn test_combat_log_searches_both_endpoints() {
        let sel = CategorySelection::Only(vec![FriendlyCategory::CombatLog]);
        assert_eq!(sel.endpoints(), vec![Endpoint::Primary, Endpoint::Developer]);
    }
}
