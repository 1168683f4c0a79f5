//! Match file downloads for matchlog.
//!
//! - [`Downloader`] streams files to disk with a bounded number of
//!   simultaneous transfers, isolating per-file failures.
//! - [`MatchFileRetrieval`] combines the existence check, listing,
//!   filtering and downloading into the operations callers use.

#![deny(unused_crate_dependencies)]

mod config;
mod downloader;
mod error;
mod progress;
mod request;
mod retrieval;

pub use config::{DEFAULT_CHUNK_SIZE, DEFAULT_MAX_CONCURRENCY, DownloaderConfig};
pub use downloader::Downloader;
pub use error::{DownloadError, DownloadResult};
pub use progress::ProgressCallback;
pub use request::{DownloadRequest, FetchOptions};
pub use retrieval::MatchFileRetrieval;

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio_test as _;
