//! Backend client for match file discovery.
//!
//! Wraps the three backend routes the retrieval layer needs: the match
//! lookup used as an existence gate, the per-endpoint file listing, and the
//! raw file download stream.
//!
//! Enable the `test-utils` feature to get [`testing::FakeBackend`], an
//! in-memory backend with canned responses, call recording and an
//! open-stream counter.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod client;
mod config;
mod error;
mod http;
mod models;
mod url;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::{DefaultMatchFilesClient, MatchFilesClient};

// Configuration
pub use config::{ApiClientConfig, DEFAULT_BASE_URL};

// Errors
pub use error::{ApiError, ApiResult};

// Transport
pub use http::{ByteStream, FileStream, HttpBackend, ReqwestBackend};

// Wire models and URL builders
pub use models::{ListResponse, ListedFile};
pub use self::url::{build_download_url, build_list_url, build_match_url};

#[cfg(any(test, feature = "test-utils"))]
pub use http::testing;

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio_test as _;
