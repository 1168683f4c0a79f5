//! Streaming file transfers with bounded concurrency.
//!
//! Bodies are written to a part file next to the target and moved onto the
//! target only once the stream has completed. On any failure the part file
//! is removed, so a failed transfer never leaves a truncated file behind.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures_util::StreamExt;
use futures_util::stream::FuturesUnordered;
use matchlog_api::{FileStream, HttpBackend, MatchFilesClient};
use matchlog_core::FileDescriptor;
use tokio::io::AsyncWriteExt;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::DownloaderConfig;
use crate::error::{DownloadError, DownloadResult};
use crate::progress::{FileProgress, ProgressCallback};
use crate::request::{DownloadRequest, FetchOptions, part_path};

/// Downloads match files through a [`MatchFilesClient`].
pub struct Downloader<B: HttpBackend> {
    client: Arc<MatchFilesClient<B>>,
    config: DownloaderConfig,
}

impl<B: HttpBackend> Downloader<B> {
    pub const fn new(client: Arc<MatchFilesClient<B>>, config: DownloaderConfig) -> Self {
        Self { client, config }
    }

    pub const fn config(&self) -> &DownloaderConfig {
        &self.config
    }

    pub const fn client(&self) -> &Arc<MatchFilesClient<B>> {
        &self.client
    }

    // ========================================================================
    // Single file
    // ========================================================================

    /// Download `url` to `target`, creating parent directories as needed.
    pub async fn fetch_one(
        &self,
        url: &Url,
        token: &str,
        target: &Path,
        progress: Option<&ProgressCallback>,
    ) -> DownloadResult<PathBuf> {
        let stream = self
            .client
            .open_url(url, token)
            .await
            .map_err(|e| DownloadError::transport(target, &e))?;
        let name = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.write_atomically(stream, target, &part_path(target, ""), &name, progress)
            .await?;
        Ok(target.to_path_buf())
    }

    /// Download one planned request.
    pub async fn fetch_request(
        &self,
        request: &DownloadRequest,
        progress: Option<&ProgressCallback>,
    ) -> DownloadResult<PathBuf> {
        let target = &request.target_path;
        let stream = self
            .client
            .open_file(&request.match_id, &request.descriptor, &request.token)
            .await
            .map_err(|e| DownloadError::transport(target, &e))?;
        self.write_atomically(
            stream,
            target,
            &request.part_path(),
            request.descriptor.basename(),
            progress,
        )
        .await?;
        Ok(target.clone())
    }

    // ========================================================================
    // Batches
    // ========================================================================

    /// Download every descriptor into `output_dir`.
    ///
    /// Failed files are logged and left out. With `max_concurrency <= 1`
    /// the result is in input order; otherwise it is in completion order.
    pub async fn fetch_many(
        &self,
        match_id: &str,
        descriptors: &[FileDescriptor],
        token: &str,
        output_dir: &Path,
        options: &FetchOptions,
    ) -> Vec<PathBuf> {
        self.fetch_many_named(match_id, descriptors, token, output_dir, options)
            .await
            .into_iter()
            .map(|(_, path)| path)
            .collect()
    }

    /// Like [`fetch_many`](Self::fetch_many), pairing each local path with
    /// the remote filename it came from.
    pub async fn fetch_many_named(
        &self,
        match_id: &str,
        descriptors: &[FileDescriptor],
        token: &str,
        output_dir: &Path,
        options: &FetchOptions,
    ) -> Vec<(String, PathBuf)> {
        let requests =
            DownloadRequest::plan(match_id, descriptors, output_dir, options.naming, token);
        let progress = options.progress.as_ref();

        let results = if self.config.is_sequential() {
            let mut done = Vec::with_capacity(requests.len());
            for request in &requests {
                if let Some(path) = self.fetch_isolated(request, progress).await {
                    done.push((request.descriptor.name.clone(), path));
                }
            }
            done
        } else {
            let semaphore = Semaphore::new(self.config.max_concurrency);
            let mut pending: FuturesUnordered<_> = requests
                .iter()
                .map(|request| {
                    let semaphore = &semaphore;
                    async move {
                        let _permit = semaphore.acquire().await.ok()?;
                        let path = self.fetch_isolated(request, progress).await?;
                        Some((request.descriptor.name.clone(), path))
                    }
                })
                .collect();

            let mut done = Vec::with_capacity(requests.len());
            while let Some(result) = pending.next().await {
                done.extend(result);
            }
            done
        };

        info!(
            match_id,
            "Downloaded {} of {} files",
            results.len(),
            requests.len()
        );
        results
    }

    /// Run one request, turning a failure into a warning.
    async fn fetch_isolated(
        &self,
        request: &DownloadRequest,
        progress: Option<&ProgressCallback>,
    ) -> Option<PathBuf> {
        match self.fetch_request(request, progress).await {
            Ok(path) => {
                info!(file = %request.descriptor.name, path = %path.display(), "Downloaded");
                Some(path)
            }
            Err(e) => {
                warn!(file = %request.descriptor.name, error = %e, "Download failed, skipping");
                None
            }
        }
    }

    // ========================================================================
    // Writing
    // ========================================================================

    async fn write_atomically(
        &self,
        stream: FileStream,
        target: &Path,
        part: &Path,
        name: &str,
        progress: Option<&ProgressCallback>,
    ) -> DownloadResult<u64> {
        if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| DownloadError::io(target, e))?;
        }

        let written = match self.stream_to_file(stream, target, part, name, progress).await {
            Ok(written) => written,
            Err(e) => {
                discard(part).await;
                return Err(e);
            }
        };

        if let Err(e) = tokio::fs::rename(part, target).await {
            discard(part).await;
            return Err(DownloadError::io(target, e));
        }
        debug!(path = %target.display(), bytes = written, "Wrote file");
        Ok(written)
    }

    async fn stream_to_file(
        &self,
        stream: FileStream,
        target: &Path,
        part: &Path,
        name: &str,
        progress: Option<&ProgressCallback>,
    ) -> DownloadResult<u64> {
        let FileStream {
            content_length,
            mut chunks,
        } = stream;
        let mut file = tokio::fs::File::create(part)
            .await
            .map_err(|e| DownloadError::io(target, e))?;
        let mut tracker = FileProgress::new(name, content_length, progress);

        while let Some(chunk) = chunks.next().await {
            let chunk = chunk.map_err(|e| DownloadError::transport(target, &e))?;
            for piece in chunk.chunks(self.config.chunk_size) {
                file.write_all(piece)
                    .await
                    .map_err(|e| DownloadError::io(target, e))?;
                tracker.advance(piece.len());
            }
        }
        file.flush()
            .await
            .map_err(|e| DownloadError::io(target, e))?;
        drop(file);

        let received = tracker.so_far();
        if let Some(expected) = content_length.filter(|&n| received < n) {
            return Err(DownloadError::Truncated {
                path: target.to_path_buf(),
                received,
                expected,
            });
        }
        tracker.finish();
        Ok(received)
    }
}

/// Best-effort removal of a part file.
async fn discard(part: &Path) {
    if let Err(e) = tokio::fs::remove_file(part).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!(path = %part.display(), error = %e, "Could not remove partial file");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matchlog_api::ApiClientConfig;
    use matchlog_api::testing::FakeBackend;
    use matchlog_core::Endpoint;
    use std::sync::Mutex;

    fn downloader(backend: FakeBackend, config: DownloaderConfig) -> Downloader<FakeBackend> {
        let client = MatchFilesClient::with_backend(&ApiClientConfig::new(), backend).unwrap();
        Downloader::new(Arc::new(client), config)
    }

    #[tokio::test]
    async fn test_fetch_one_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let d = downloader(
            FakeBackend::new().with_body("match/M1/a.log", "hello"),
            DownloaderConfig::new(),
        );
        let url = Url::parse("https://demo.rally-here.io/file/v1/file/match/M1/a.log").unwrap();
        let target = dir.path().join("nested/deeper/a.log");

        let path = d.fetch_one(&url, "t", &target, None).await.unwrap();
        assert_eq!(path, target);
        assert_eq!(std::fs::read(&target).unwrap(), b"hello");
        assert!(!part_path(&target, "").exists());
    }

    #[tokio::test]
    async fn test_fetch_one_http_error_keeps_target_path() {
        let dir = tempfile::tempdir().unwrap();
        let d = downloader(
            FakeBackend::new().with_status("a.log", 403),
            DownloaderConfig::new(),
        );
        let url = Url::parse("https://x/a.log").unwrap();
        let target = dir.path().join("a.log");

        let err = d.fetch_one(&url, "t", &target, None).await.unwrap_err();
        assert_eq!(err.path(), target.as_path());
        assert!(matches!(err, DownloadError::Transport { status: Some(403), .. }));
        assert!(!target.exists());
    }

    #[tokio::test]
    async fn test_progress_is_chunked_and_monotonic() {
        let dir = tempfile::tempdir().unwrap();
        let payload = vec![1u8; 20_000];
        let d = downloader(
            FakeBackend::new().with_body("big.log", payload),
            DownloaderConfig::new().with_chunk_size(8 * 1024),
        );
        let calls: Arc<Mutex<Vec<(u64, Option<u64>)>>> = Arc::default();
        let sink = Arc::clone(&calls);
        let cb: ProgressCallback = Arc::new(move |name: &str, so_far: u64, total: Option<u64>| {
            assert_eq!(name, "big.log");
            sink.lock().unwrap().push((so_far, total));
        });
        let url = Url::parse("https://x/big.log").unwrap();

        d.fetch_one(&url, "t", &dir.path().join("big.log"), Some(&cb))
            .await
            .unwrap();

        let calls = calls.lock().unwrap();
        assert!(calls.windows(2).all(|w| w[0].0 <= w[1].0));
        assert!(calls.iter().all(|(so_far, _)| *so_far > 0));
        // Every update covers at most one chunk
        assert!(calls.windows(2).all(|w| w[1].0 - w[0].0 <= 8 * 1024));
        assert_eq!(calls.last(), Some(&(20_000, Some(20_000))));
    }

    #[tokio::test]
    async fn test_unknown_length_still_signals_completion() {
        let dir = tempfile::tempdir().unwrap();
        let d = downloader(
            FakeBackend::new().with_body("a.log", "abc").without_content_length(),
            DownloaderConfig::new(),
        );
        let last: Arc<Mutex<Option<(u64, Option<u64>)>>> = Arc::default();
        let sink = Arc::clone(&last);
        let cb: ProgressCallback = Arc::new(move |_: &str, so_far: u64, total: Option<u64>| {
            *sink.lock().unwrap() = Some((so_far, total));
        });
        let url = Url::parse("https://x/a.log").unwrap();

        d.fetch_one(&url, "t", &dir.path().join("a.log"), Some(&cb))
            .await
            .unwrap();
        assert_eq!(*last.lock().unwrap(), Some((3, Some(3))));
    }

    #[tokio::test]
    async fn test_fetch_many_duplicate_names_across_endpoints() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FakeBackend::new()
            .with_body("file/v1/file/match/M1/CombatLog_S1.log", "same")
            .with_body("file/v1/developer-file/match/M1/CombatLog_S1.log", "same");
        let d = downloader(backend, DownloaderConfig::new());
        let descriptors = vec![
            FileDescriptor::new("CombatLog_S1.log", Endpoint::Primary),
            FileDescriptor::new("CombatLog_S1.log", Endpoint::Developer),
        ];

        let paths = d
            .fetch_many("M1", &descriptors, "t", dir.path(), &FetchOptions::new())
            .await;
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0], paths[1]);
        assert_eq!(std::fs::read(&paths[0]).unwrap(), b"same");
        let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }
}
