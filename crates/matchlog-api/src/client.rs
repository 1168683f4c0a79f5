//! Client for match existence checks and file listings.
//!
//! [`MatchFilesClient`] is generic over an HTTP backend so tests can run it
//! against the in-memory fake. It implements the existence gate and the
//! multi-endpoint lister; transfers are driven by `matchlog-download`.

use std::sync::Arc;

use matchlog_core::{Endpoint, FileDescriptor, RetrievalError, RetrievalResult};
use serde::de::IgnoredAny;
use tracing::{debug, warn};
use url::Url;

use crate::config::ApiClientConfig;
use crate::error::ApiResult;
use crate::http::{FileStream, HttpBackend, ReqwestBackend};
use crate::models::ListResponse;
use crate::url::{build_download_url, build_list_url, build_match_url};

// ============================================================================
// Type Aliases
// ============================================================================

/// Default client using the reqwest HTTP backend.
pub type DefaultMatchFilesClient = MatchFilesClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Client for the match and file storage endpoints of the backend.
pub struct MatchFilesClient<B: HttpBackend> {
    backend: Arc<B>,
    base_url: Url,
}

impl DefaultMatchFilesClient {
    /// Create a new client with the given configuration.
    pub fn new(config: &ApiClientConfig) -> ApiResult<Self> {
        let backend = ReqwestBackend::new(config)?;
        Self::with_backend(config, backend)
    }
}

impl<B: HttpBackend> MatchFilesClient<B> {
    /// Create a client over a custom backend.
    pub fn with_backend(config: &ApiClientConfig, backend: B) -> ApiResult<Self> {
        Ok(Self::from_shared(
            Url::parse(&config.base_url)?,
            Arc::new(backend),
        ))
    }

    /// Create a client over a backend that is shared with other users.
    pub const fn from_shared(base_url: Url, backend: Arc<B>) -> Self {
        Self { backend, base_url }
    }

    pub const fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ------------------------------------------------------------------------
    // Existence gate
    // ------------------------------------------------------------------------

    /// Look the match up. A 404 means `false`; any other failure is
    /// returned as an error.
    pub async fn match_exists(&self, match_id: &str, token: &str) -> ApiResult<bool> {
        let url = build_match_url(&self.base_url, match_id);
        match self.backend.get_json::<IgnoredAny>(&url, token).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Fail with [`RetrievalError::MatchNotFound`] unless the match exists.
    pub async fn ensure_match_exists(&self, match_id: &str, token: &str) -> RetrievalResult<()> {
        if self.match_exists(match_id, token).await? {
            Ok(())
        } else {
            Err(RetrievalError::MatchNotFound {
                match_id: match_id.to_string(),
            })
        }
    }

    // ------------------------------------------------------------------------
    // Listing
    // ------------------------------------------------------------------------

    /// List one endpoint. No gate; errors propagate.
    pub async fn list(
        &self,
        match_id: &str,
        token: &str,
        endpoint: Endpoint,
    ) -> ApiResult<Vec<FileDescriptor>> {
        let url = build_list_url(&self.base_url, endpoint, match_id);
        let response: ListResponse = self.backend.get_json(&url, token).await?;
        let descriptors = response.into_descriptors(endpoint);
        debug!(
            match_id,
            %endpoint,
            count = descriptors.len(),
            "Listed match files"
        );
        Ok(descriptors)
    }

    /// Gate once, then list `endpoints` in order.
    ///
    /// A failing endpoint is logged and contributes nothing as long as
    /// another endpoint lists; when all of them fail, the first error is
    /// returned.
    pub async fn list_endpoints(
        &self,
        match_id: &str,
        token: &str,
        endpoints: &[Endpoint],
    ) -> RetrievalResult<Vec<FileDescriptor>> {
        self.ensure_match_exists(match_id, token).await?;
        self.list_endpoints_unchecked(match_id, token, endpoints).await
    }

    /// Same as [`list_endpoints`](Self::list_endpoints) without the gate,
    /// for callers that already checked the match.
    pub async fn list_endpoints_unchecked(
        &self,
        match_id: &str,
        token: &str,
        endpoints: &[Endpoint],
    ) -> RetrievalResult<Vec<FileDescriptor>> {
        let mut all = Vec::new();
        let mut listed = endpoints.is_empty();
        let mut first_error = None;
        for &endpoint in endpoints {
            match self.list(match_id, token, endpoint).await {
                Ok(descriptors) => {
                    listed = true;
                    all.extend(descriptors);
                }
                Err(e) => {
                    warn!(match_id, %endpoint, error = %e, "Listing endpoint failed");
                    first_error.get_or_insert(e);
                }
            }
        }
        match first_error {
            Some(e) if !listed => Err(e.into()),
            _ => Ok(all),
        }
    }

    /// Every file on every endpoint, PRIMARY first. Duplicates across
    /// endpoints are kept.
    pub async fn list_all(&self, match_id: &str, token: &str) -> RetrievalResult<Vec<FileDescriptor>> {
        self.list_endpoints(match_id, token, &Endpoint::ALL).await
    }

    /// The first descriptor named exactly `filename` across all endpoints.
    pub async fn find_file(
        &self,
        match_id: &str,
        filename: &str,
        token: &str,
    ) -> RetrievalResult<FileDescriptor> {
        self.list_all(match_id, token)
            .await?
            .into_iter()
            .find(|d| d.name == filename)
            .ok_or_else(|| RetrievalError::file_not_found(match_id, format!("file '{filename}'")))
    }

    // ------------------------------------------------------------------------
    // Transfers
    // ------------------------------------------------------------------------

    /// Download URL for a listed file.
    pub fn download_url(&self, match_id: &str, descriptor: &FileDescriptor) -> Url {
        build_download_url(&self.base_url, descriptor.endpoint, match_id, &descriptor.name)
    }

    /// Open a listed file for streaming.
    pub async fn open_file(
        &self,
        match_id: &str,
        descriptor: &FileDescriptor,
        token: &str,
    ) -> ApiResult<FileStream> {
        self.open_url(&self.download_url(match_id, descriptor), token)
            .await
    }

    /// Open an arbitrary URL for streaming.
    pub async fn open_url(&self, url: &Url, token: &str) -> ApiResult<FileStream> {
        self.backend.get_stream(url, token).await
    }
}
