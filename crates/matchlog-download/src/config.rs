//! Downloader configuration.

/// Default number of simultaneous transfers.
pub const DEFAULT_MAX_CONCURRENCY: usize = 3;

/// Largest slice written to disk (and reported to progress) at once.
pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;

/// Configuration for a [`Downloader`](crate::Downloader).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloaderConfig {
    /// Upper bound on simultaneously open transfers. `<= 1` means strictly
    /// sequential, in input order.
    pub max_concurrency: usize,
    /// Write/progress granularity in bytes.
    pub chunk_size: usize,
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl DownloaderConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }

    /// Force one transfer at a time.
    #[must_use]
    pub const fn sequential(self) -> Self {
        self.with_max_concurrency(1)
    }

    /// Set the chunk size (clamped to at least one byte).
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    #[must_use]
    pub const fn is_sequential(&self) -> bool {
        self.max_concurrency <= 1
    }
}
