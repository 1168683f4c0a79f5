//! Narrowing a listing down to the files a caller asked for.
//!
//! Individual predicates are plain functions over slices of
//! [`FileDescriptor`]s; [`FileFilter`] composes several of them with AND
//! logic. Every operation preserves the input order.

use crate::domain::{Endpoint, FileDescriptor, FileType, FriendlyCategory};

/// One condition a descriptor can be tested against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilePredicate {
    /// Exact [`FileType`] equality, via the classifier.
    Type(FileType),
    /// Substring containment of the session id in the filename.
    Session(String),
    /// Filename prefix of a friendly category.
    Category(FriendlyCategory),
    /// Origin endpoint.
    Endpoint(Endpoint),
}

impl FilePredicate {
    /// Test a single descriptor.
    #[must_use]
    pub fn matches(&self, descriptor: &FileDescriptor) -> bool {
        match self {
            Self::Type(t) => descriptor.file_type() == *t,
            Self::Session(session) => descriptor.name.contains(session.as_str()),
            Self::Category(c) => c.matches(&descriptor.name),
            Self::Endpoint(e) => descriptor.endpoint == *e,
        }
    }

    /// Human-readable description.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Type(t) => format!("type={t}"),
            Self::Session(s) => format!("session~{s}"),
            Self::Category(c) => format!("category={c}"),
            Self::Endpoint(e) => format!("endpoint={e}"),
        }
    }
}

/// Conjunction of [`FilePredicate`]s.
///
/// An empty filter keeps everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileFilter {
    predicates: Vec<FilePredicate>,
}

impl FileFilter {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            predicates: Vec::new(),
        }
    }

    /// Add an arbitrary predicate.
    #[must_use]
    pub fn with(mut self, predicate: FilePredicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    #[must_use]
    pub fn with_type(self, file_type: FileType) -> Self {
        self.with(FilePredicate::Type(file_type))
    }

    /// Add a session predicate; `None` adds nothing.
    #[must_use]
    pub fn with_session(self, session_id: Option<&str>) -> Self {
        match session_id {
            Some(s) => self.with(FilePredicate::Session(s.to_string())),
            None => self,
        }
    }

    #[must_use]
    pub fn with_category(self, category: FriendlyCategory) -> Self {
        self.with(FilePredicate::Category(category))
    }

    #[must_use]
    pub fn with_endpoint(self, endpoint: Endpoint) -> Self {
        self.with(FilePredicate::Endpoint(endpoint))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// True when every predicate holds.
    #[must_use]
    pub fn matches(&self, descriptor: &FileDescriptor) -> bool {
        self.predicates.iter().all(|p| p.matches(descriptor))
    }

    /// The matching subsequence, cloned.
    #[must_use]
    pub fn apply(&self, descriptors: &[FileDescriptor]) -> Vec<FileDescriptor> {
        descriptors
            .iter()
            .filter(|d| self.matches(d))
            .cloned()
            .collect()
    }

    /// Description for log lines, e.g. `type=CHAT_LOG AND session~S1`.
    #[must_use]
    pub fn description(&self) -> String {
        if self.predicates.is_empty() {
            return "any".to_string();
        }
        self.predicates
            .iter()
            .map(FilePredicate::description)
            .collect::<Vec<_>>()
            .join(" AND ")
    }
}

/// Descriptors whose classified type equals `file_type`.
#[must_use]
pub fn by_type(descriptors: &[FileDescriptor], file_type: FileType) -> Vec<FileDescriptor> {
    FileFilter::new().with_type(file_type).apply(descriptors)
}

/// Descriptors whose name contains `session_id`.
///
/// This is a substring test, not an exact match: session ids embedded in
/// filenames may carry surrounding text.
#[must_use]
pub fn by_session(descriptors: &[FileDescriptor], session_id: &str) -> Vec<FileDescriptor> {
    FileFilter::new()
        .with_session(Some(session_id))
        .apply(descriptors)
}

/// Descriptors whose name starts with the category's prefix.
#[must_use]
pub fn by_category(
    descriptors: &[FileDescriptor],
    category: FriendlyCategory,
) -> Vec<FileDescriptor> {
    FileFilter::new().with_category(category).apply(descriptors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing() -> Vec<FileDescriptor> {
        vec![
            FileDescriptor::new("CombatLog_S1.log", Endpoint::Primary),
            FileDescriptor::new("ChatLog_S1.log", Endpoint::Developer),
            FileDescriptor::new("ChatLog_S2.log", Endpoint::Developer),
            FileDescriptor::new("Diagnostics_S1.json", Endpoint::Developer),
            FileDescriptor::new("Inst_S1.log", Endpoint::Developer),
        ]
    }

    fn names(descriptors: &[FileDescriptor]) -> Vec<&str> {
        descriptors.iter().map(|d| d.name.as_str()).collect()
    }

    #[test]
    fn test_by_session_substring() {
        let single = vec![FileDescriptor::new("ChatLog_ABC123.log", Endpoint::Developer)];
        assert_eq!(by_session(&single, "ABC123"), single);
        assert!(by_session(&single, "XYZ").is_empty());
        // Partial ids match too
        assert_eq!(by_session(&single, "BC1").len(), 1);
    }

    #[test]
    fn test_by_type_preserves_order() {
        let chats = by_type(&listing(), FileType::ChatLog);
        assert_eq!(names(&chats), vec!["ChatLog_S1.log", "ChatLog_S2.log"]);
        assert!(by_type(&listing(), FileType::ServerMetadata).is_empty());
    }

    #[test]
    fn test_by_category_uses_prefix() {
        assert_eq!(
            names(&by_category(&listing(), FriendlyCategory::ServerLog)),
            vec!["Inst_S1.log"]
        );
        assert_eq!(
            names(&by_category(&listing(), FriendlyCategory::Diagnostics)),
            vec!["Diagnostics_S1.json"]
        );
    }

    #[test]
    fn test_combined_filters_are_and() {
        let filter = FileFilter::new()
            .with_type(FileType::ChatLog)
            .with_session(Some("S2"));
        assert_eq!(names(&filter.apply(&listing())), vec!["ChatLog_S2.log"]);

        let none = FileFilter::new()
            .with_type(FileType::CombatLog)
            .with_endpoint(Endpoint::Developer);
        assert!(none.apply(&listing()).is_empty());
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let filter = FileFilter::new().with_session(None);
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&listing()).len(), 5);
        assert_eq!(filter.description(), "any");
    }

    #[test]
    fn test_description() {
        let filter = FileFilter::new()
            .with_type(FileType::ChatLog)
            .with_session(Some("S1"));
        assert_eq!(filter.description(), "type=CHAT_LOG AND session~S1");
    }
}
