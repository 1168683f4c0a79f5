//! Wire models for backend responses.

use matchlog_core::{Endpoint, FileDescriptor};
use serde::Deserialize;

/// Body of `GET /file/v1/{endpoint}/match/{match_id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListResponse {
    #[serde(default)]
    pub files: Vec<ListedFile>,
}

/// One entry of a file listing. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ListedFile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default, rename = "sessionId")]
    pub session_id: Option<String>,
}

impl ListResponse {
    /// Convert to descriptors tagged with their origin endpoint, in
    /// listing order. Entries without a name are dropped.
    pub fn into_descriptors(self, endpoint: Endpoint) -> Vec<FileDescriptor> {
        self.files
            .into_iter()
            .filter_map(|f| {
                let name = f.name.filter(|n| !n.is_empty())?;
                Some(FileDescriptor::from_listing(name, f.size, endpoint, f.session_id))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_listing() {
        let body = json!({
            "files": [
                {"name": "CombatLog_S1.log", "size": 120, "sessionId": "S1", "contentType": "text/plain"},
                {"name": "MatchSummary_M1.json"}
            ]
        });
        let parsed: ListResponse = serde_json::from_value(body).unwrap();
        let descriptors = parsed.into_descriptors(Endpoint::Primary);

        assert_eq!(descriptors.len(), 2);
        assert_eq!(descriptors[0].name, "CombatLog_S1.log");
        assert_eq!(descriptors[0].size_bytes, Some(120));
        assert_eq!(descriptors[0].session_id.as_deref(), Some("S1"));
        assert_eq!(descriptors[1].size_bytes, None);
        assert!(descriptors.iter().all(|d| d.endpoint == Endpoint::Primary));
    }

    #[test]
    fn test_nameless_entries_are_skipped() {
        let body = json!({
            "files": [
                {"size": 5},
                {"name": "", "size": 1},
                {"name": null},
                {"name": "ChatLog_S1.log", "size": 4}
            ]
        });
        let parsed: ListResponse = serde_json::from_value(body).unwrap();
        let descriptors = parsed.into_descriptors(Endpoint::Developer);
        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].name, "ChatLog_S1.log");
    }

    #[test]
    fn test_missing_files_is_empty() {
        let parsed: ListResponse = serde_json::from_value(json!({})).unwrap();
        assert!(parsed.files.is_empty());
    }
}
