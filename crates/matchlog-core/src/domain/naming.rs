use serde::{Deserialize, Serialize};

/// How a downloaded file is named on local disk.
///
/// Both schemes are deterministic functions of `(match_id, name)`, so
/// distinct remote names never collide within one match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingScheme {
    /// The bare remote filename.
    #[default]
    Bare,
    /// `{match_id}_{name}`, for merging several matches into one directory.
    MatchPrefixed,
}

impl NamingScheme {
    /// Local filename for `name` (only its final path component is used).
    #[must_use]
    pub fn file_name(&self, match_id: &str, name: &str) -> String {
        let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
        match self {
            Self::Bare => base.to_string(),
            Self::MatchPrefixed => format!("{match_id}_{base}"),
        }
    }
}
