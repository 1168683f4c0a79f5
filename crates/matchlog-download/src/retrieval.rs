//! Match file retrieval: the entry points callers use.
//!
//! Every operation runs the same sequence: check the match exists, list the
//! relevant endpoints, filter, then download. The existence check runs
//! exactly once per call and before any listing, so an unknown match costs
//! a single request. Nothing is cached between calls.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use matchlog_api::{HttpBackend, MatchFilesClient};
use matchlog_core::{
    CategorySelection, Endpoint, FileDescriptor, FileFilter, FileType, RetrievalError,
    RetrievalResult,
};
use tracing::{debug, info, warn};

use crate::config::DownloaderConfig;
use crate::downloader::Downloader;
use crate::progress::ProgressCallback;
use crate::request::FetchOptions;

/// High-level retrieval over one backend.
pub struct MatchFileRetrieval<B: HttpBackend> {
    client: Arc<MatchFilesClient<B>>,
    downloader: Downloader<B>,
}

impl<B: HttpBackend> MatchFileRetrieval<B> {
    pub fn new(client: MatchFilesClient<B>, config: DownloaderConfig) -> Self {
        let client = Arc::new(client);
        let downloader = Downloader::new(Arc::clone(&client), config);
        Self { client, downloader }
    }

    pub fn client(&self) -> &MatchFilesClient<B> {
        &self.client
    }

    pub const fn downloader(&self) -> &Downloader<B> {
        &self.downloader
    }

    /// Every file on every endpoint.
    pub async fn list_all_match_files(
        &self,
        match_id: &str,
        token: &str,
    ) -> RetrievalResult<Vec<FileDescriptor>> {
        self.client.list_all(match_id, token).await
    }

    /// Metadata for one file by exact name.
    pub async fn find_file(
        &self,
        match_id: &str,
        filename: &str,
        token: &str,
    ) -> RetrievalResult<FileDescriptor> {
        self.client.find_file(match_id, filename, token).await
    }

    /// Download every file of `file_type`, optionally restricted to one
    /// session. Fails with `FileNotFound` when nothing matches.
    pub async fn download_by_type(
        &self,
        match_id: &str,
        file_type: FileType,
        session_id: Option<&str>,
        output_dir: &Path,
        token: &str,
        options: &FetchOptions,
    ) -> RetrievalResult<Vec<PathBuf>> {
        self.client.ensure_match_exists(match_id, token).await?;
        let listing = self
            .client
            .list_endpoints_unchecked(match_id, token, file_type.endpoints())
            .await?;
        self.download_filtered(
            match_id,
            &listing,
            file_type,
            session_id,
            output_dir,
            token,
            options,
        )
        .await
    }

    /// Download every file of the match. Individual failures are skipped.
    pub async fn download_all(
        &self,
        match_id: &str,
        output_dir: &Path,
        token: &str,
        options: &FetchOptions,
    ) -> RetrievalResult<Vec<PathBuf>> {
        let listing = self.client.list_all(match_id, token).await?;
        Ok(self
            .downloader
            .fetch_many(match_id, &listing, token, output_dir, options)
            .await)
    }

    /// Download the files of the named friendly categories.
    ///
    /// `categories` is either `["All"]` (or empty) or a list of category
    /// names; unknown names fail before any request is made. Returns a map
    /// from remote filename to local path.
    pub async fn download_friendly_categories<S: AsRef<str> + Sync>(
        &self,
        match_id: &str,
        categories: &[S],
        session_id: Option<&str>,
        output_dir: &Path,
        token: &str,
        options: &FetchOptions,
    ) -> RetrievalResult<HashMap<String, PathBuf>> {
        let selection = CategorySelection::parse(categories)?;
        self.client.ensure_match_exists(match_id, token).await?;

        let listing = self
            .client
            .list_endpoints_unchecked(match_id, token, &selection.endpoints())
            .await?;
        let wanted = selection.categories();
        let session = FileFilter::new().with_session(session_id);
        let selected: Vec<FileDescriptor> = listing
            .into_iter()
            .filter(|d| {
                wanted
                    .iter()
                    .any(|c| c.endpoints().contains(&d.endpoint) && c.matches(&d.name))
            })
            .filter(|d| session.matches(d))
            .collect();

        if selected.is_empty() {
            info!(match_id, ?wanted, "No files in the requested categories");
            return Ok(HashMap::new());
        }
        debug!(match_id, count = selected.len(), "Selected category files");

        Ok(self
            .downloader
            .fetch_many_named(match_id, &selected, token, output_dir, options)
            .await
            .into_iter()
            .collect())
    }

    /// Download a single log for one session.
    ///
    /// With a session id the exact `<Prefix><session>.<ext>` name is
    /// preferred, then any name containing the id; without one the first
    /// file of the type is taken. The file is saved under its bare name.
    pub async fn download_session_log(
        &self,
        match_id: &str,
        file_type: FileType,
        session_id: Option<&str>,
        output_dir: &Path,
        token: &str,
        progress: Option<&ProgressCallback>,
    ) -> RetrievalResult<PathBuf> {
        self.client.ensure_match_exists(match_id, token).await?;
        let listing = self
            .client
            .list_endpoints_unchecked(match_id, token, file_type.endpoints())
            .await?;
        let typed = FileFilter::new().with_type(file_type).apply(&listing);

        let selected = match session_id {
            Some(session) => {
                let exact = file_type.session_file_name(session);
                typed
                    .iter()
                    .find(|d| exact.as_deref() == Some(d.name.as_str()))
                    .or_else(|| typed.iter().find(|d| d.name.contains(session)))
            }
            None => typed.first(),
        };
        let Some(descriptor) = selected else {
            let what = session_id.map_or_else(
                || format!("{file_type} file"),
                |s| format!("{file_type} file for session '{s}'"),
            );
            return Err(RetrievalError::file_not_found(match_id, what));
        };

        let url = self.client.download_url(match_id, descriptor);
        let target = output_dir.join(descriptor.basename());
        let path = self
            .downloader
            .fetch_one(&url, token, &target, progress)
            .await?;
        info!(file = %descriptor.name, path = %path.display(), "Downloaded session log");
        Ok(path)
    }

    /// Download several types, optionally falling back to everything.
    ///
    /// A type with no files is logged and skipped. When no type yielded a
    /// file and `fallback_all` is set, every file of the match is
    /// downloaded instead.
    #[allow(clippy::too_many_arguments)]
    pub async fn download_types_with_fallback(
        &self,
        match_id: &str,
        types: &[FileType],
        session_id: Option<&str>,
        output_dir: &Path,
        token: &str,
        fallback_all: bool,
        options: &FetchOptions,
    ) -> RetrievalResult<Vec<PathBuf>> {
        self.client.ensure_match_exists(match_id, token).await?;

        let endpoints: Vec<Endpoint> = Endpoint::ALL
            .into_iter()
            .filter(|e| types.iter().any(|t| t.endpoints().contains(e)))
            .collect();
        let listing = self
            .client
            .list_endpoints_unchecked(match_id, token, &endpoints)
            .await?;

        let mut paths = Vec::new();
        for &file_type in types {
            let scoped: Vec<FileDescriptor> = listing
                .iter()
                .filter(|d| file_type.endpoints().contains(&d.endpoint))
                .cloned()
                .collect();
            match self
                .download_filtered(
                    match_id, &scoped, file_type, session_id, output_dir, token, options,
                )
                .await
            {
                Ok(found) => paths.extend(found),
                Err(RetrievalError::FileNotFound { what, .. }) => {
                    warn!(match_id, "No {what}, skipping");
                }
                Err(e) => return Err(e),
            }
        }

        if paths.is_empty() && fallback_all {
            warn!(match_id, "No requested file types found, downloading all files");
            let everything = if endpoints.len() == Endpoint::ALL.len() {
                listing
            } else {
                self.client
                    .list_endpoints_unchecked(match_id, token, &Endpoint::ALL)
                    .await?
            };
            paths = self
                .downloader
                .fetch_many(match_id, &everything, token, output_dir, options)
                .await;
        }
        Ok(paths)
    }

    #[allow(clippy::too_many_arguments)]
    async fn download_filtered(
        &self,
        match_id: &str,
        listing: &[FileDescriptor],
        file_type: FileType,
        session_id: Option<&str>,
        output_dir: &Path,
        token: &str,
        options: &FetchOptions,
    ) -> RetrievalResult<Vec<PathBuf>> {
        let filter = FileFilter::new()
            .with_type(file_type)
            .with_session(session_id);
        let selected = filter.apply(listing);
        if selected.is_empty() {
            return Err(RetrievalError::file_not_found(
                match_id,
                format!("files matching {}", filter.description()),
            ));
        }
        debug!(match_id, filter = %filter.description(), count = selected.len(), "Selected files");
        Ok(self
            .downloader
            .fetch_many(match_id, &selected, token, output_dir, options)
            .await)
    }
}
