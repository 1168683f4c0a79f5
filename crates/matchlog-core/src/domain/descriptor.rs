use serde::{Deserialize, Serialize};

use super::file_type::{Endpoint, FileType, SESSION_PREFIXES, classify, extract_session_id};

/// One file as seen on a storage endpoint.
///
/// The `name` is the authoritative key for type and session inference.
/// A descriptor is meaningless without its `endpoint`, which is needed to
/// build the download URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    /// Remote filename.
    pub name: String,
    /// Size reported by the endpoint, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    /// Storage namespace the entry was listed from.
    pub endpoint: Endpoint,
    /// Session id from listing metadata, or parsed from the name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl FileDescriptor {
    /// Create a descriptor with no size or session information.
    pub fn new(name: impl Into<String>, endpoint: Endpoint) -> Self {
        Self {
            name: name.into(),
            size_bytes: None,
            endpoint,
            session_id: None,
        }
    }

    /// Build a descriptor from one listing entry.
    ///
    /// When `session_id` is absent (or empty) the id is parsed out of the
    /// filename as a fallback.
    pub fn from_listing(
        name: impl Into<String>,
        size_bytes: Option<u64>,
        endpoint: Endpoint,
        session_id: Option<String>,
    ) -> Self {
        let name = name.into();
        let session_id = session_id
            .filter(|s| !s.is_empty())
            .or_else(|| extract_session_id(&name, SESSION_PREFIXES));
        Self {
            name,
            size_bytes,
            endpoint,
            session_id,
        }
    }

    #[must_use]
    pub const fn with_size(mut self, size_bytes: u64) -> Self {
        self.size_bytes = Some(size_bytes);
        self
    }

    /// Type of this file, recomputed from the name.
    #[must_use]
    pub fn file_type(&self) -> FileType {
        classify(&self.name)
    }

    /// Final path component of the remote name.
    ///
    /// Remote names are flat in practice; this guards against a listing
    /// entry that carries directory separators.
    #[must_use]
    pub fn basename(&self) -> &str {
        self.name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_listing_prefers_metadata_session() {
        let d = FileDescriptor::from_listing(
            "CombatLog_60ce5622-4b06-44f3-8663-0030d6c23d11.log",
            Some(10),
            Endpoint::Primary,
            Some("meta-session".to_string()),
        );
        assert_eq!(d.session_id.as_deref(), Some("meta-session"));
        assert_eq!(d.size_bytes, Some(10));
    }

    #[test]
    fn test_from_listing_falls_back_to_filename() {
        let d = FileDescriptor::from_listing(
            "ChatLog_60ce5622-4b06-44f3-8663-0030d6c23d11.log",
            None,
            Endpoint::Developer,
            Some(String::new()),
        );
        assert_eq!(
            d.session_id.as_deref(),
            Some("60ce5622-4b06-44f3-8663-0030d6c23d11")
        );
    }

    #[test]
    fn test_file_type_and_basename() {
        let d = FileDescriptor::new("ChatLog_S1.log", Endpoint::Developer);
        assert_eq!(d.file_type(), FileType::ChatLog);
        assert_eq!(d.basename(), "ChatLog_S1.log");

        let nested = FileDescriptor::new("logs/Inst_1.log", Endpoint::Developer);
        assert_eq!(nested.basename(), "Inst_1.log");
    }
}
