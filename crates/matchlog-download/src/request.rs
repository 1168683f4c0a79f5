//! Download work items and per-batch options.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use matchlog_core::{FileDescriptor, NamingScheme};

use crate::progress::ProgressCallback;

/// One file to transfer. Owned by the downloader for the duration of the
/// transfer and discarded afterwards.
#[derive(Clone)]
pub struct DownloadRequest {
    pub match_id: String,
    pub descriptor: FileDescriptor,
    pub target_path: PathBuf,
    pub token: String,
}

impl DownloadRequest {
    /// Plan a request: the target is `output_dir` joined with the local
    /// name chosen by `naming`.
    pub fn new(
        match_id: &str,
        descriptor: FileDescriptor,
        output_dir: &Path,
        naming: NamingScheme,
        token: &str,
    ) -> Self {
        let target_path = output_dir.join(naming.file_name(match_id, &descriptor.name));
        Self {
            match_id: match_id.to_string(),
            descriptor,
            target_path,
            token: token.to_string(),
        }
    }

    /// Plan one request per descriptor, in order.
    pub fn plan(
        match_id: &str,
        descriptors: &[FileDescriptor],
        output_dir: &Path,
        naming: NamingScheme,
        token: &str,
    ) -> Vec<Self> {
        descriptors
            .iter()
            .map(|d| Self::new(match_id, d.clone(), output_dir, naming, token))
            .collect()
    }

    /// Where the body is written before it is moved onto the target. Keyed
    /// by endpoint so the same name listed twice never shares a part file.
    pub fn part_path(&self) -> PathBuf {
        part_path(&self.target_path, self.descriptor.endpoint.as_path_segment())
    }
}

impl fmt::Debug for DownloadRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DownloadRequest")
            .field("match_id", &self.match_id)
            .field("descriptor", &self.descriptor)
            .field("target_path", &self.target_path)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// `{target}.{tag}.part`, or `{target}.part` without a tag.
pub(crate) fn part_path(target: &Path, tag: &str) -> PathBuf {
    let mut name = target.file_name().unwrap_or_default().to_os_string();
    if !tag.is_empty() {
        name.push(".");
        name.push(tag);
    }
    name.push(".part");
    target.with_file_name(name)
}

/// Options for one `fetch_many` batch.
#[derive(Clone, Default)]
pub struct FetchOptions {
    pub naming: NamingScheme,
    pub progress: Option<ProgressCallback>,
}

impl FetchOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_naming(mut self, naming: NamingScheme) -> Self {
        self.naming = naming;
        self
    }

    #[must_use]
    pub fn with_progress<F>(mut self, progress: F) -> Self
    where
        F: Fn(&str, u64, Option<u64>) + Send + Sync + 'static,
    {
        self.progress = Some(Arc::new(progress));
        self
    }

    #[must_use]
    pub fn with_optional_progress(mut self, progress: Option<ProgressCallback>) -> Self {
        self.progress = progress;
        self
    }
}

impl fmt::Debug for FetchOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchOptions")
            .field("naming", &self.naming)
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matchlog_core::Endpoint;

    #[test]
    fn test_plan_targets() {
        let descriptors = vec![
            FileDescriptor::new("CombatLog_S1.log", Endpoint::Primary),
            FileDescriptor::new("ChatLog_S1.log", Endpoint::Developer),
        ];
        let requests = DownloadRequest::plan(
            "M1",
            &descriptors,
            Path::new("out"),
            NamingScheme::MatchPrefixed,
            "tok",
        );
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].target_path, PathBuf::from("out/M1_CombatLog_S1.log"));
        assert_eq!(requests[1].target_path, PathBuf::from("out/M1_ChatLog_S1.log"));
    }

    #[test]
    fn test_part_path_is_per_endpoint() {
        let primary = DownloadRequest::new(
            "M1",
            FileDescriptor::new("CombatLog_S1.log", Endpoint::Primary),
            Path::new("out"),
            NamingScheme::Bare,
            "tok",
        );
        let developer = DownloadRequest::new(
            "M1",
            FileDescriptor::new("CombatLog_S1.log", Endpoint::Developer),
            Path::new("out"),
            NamingScheme::Bare,
            "tok",
        );
        assert_eq!(primary.target_path, developer.target_path);
        assert_eq!(primary.part_path(), PathBuf::from("out/CombatLog_S1.log.file.part"));
        assert_ne!(primary.part_path(), developer.part_path());
        assert_eq!(part_path(Path::new("x/a.log"), ""), PathBuf::from("x/a.log.part"));
    }

    #[test]
    fn test_debug_redacts_token() {
        let request = DownloadRequest::new(
            "M1",
            FileDescriptor::new("a.log", Endpoint::Primary),
            Path::new("out"),
            NamingScheme::Bare,
            "secret-token",
        );
        assert!(!format!("{request:?}").contains("secret-token"));
    }
}
