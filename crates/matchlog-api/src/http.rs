//! HTTP backend abstraction for the match files API.
//!
//! This module provides a trait-based HTTP backend that allows for
//! dependency injection and easy testing. The production implementation
//! uses reqwest with bearer authentication. No request is retried: a failed
//! call is reported to the caller as-is.

use std::fmt;
use std::pin::Pin;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::{Stream, TryStreamExt};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ApiClientConfig;
use crate::error::{ApiError, ApiResult};

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Stream of body chunks as they arrive from the wire.
pub type ByteStream = Pin<Box<dyn Stream<Item = ApiResult<Bytes>> + Send>>;

/// An open file transfer.
pub struct FileStream {
    /// Size announced by the server, if any.
    pub content_length: Option<u64>,
    /// The body, chunk by chunk.
    pub chunks: ByteStream,
}

impl fmt::Debug for FileStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileStream")
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}

/// Trait for HTTP backends that can fetch JSON and stream bodies.
///
/// Every call takes the bearer token explicitly; backends hold no
/// credentials of their own.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// Fetch JSON from a URL and deserialize it.
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url, token: &str) -> ApiResult<T>;

    /// Open a URL as a byte stream. Non-success statuses fail before any
    /// body is read.
    async fn get_stream(&self, url: &Url, token: &str) -> ApiResult<FileStream>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest.
pub struct ReqwestBackend {
    client: reqwest::Client,
    request_timeout: Duration,
}

impl ReqwestBackend {
    /// Create a new reqwest backend with the given configuration.
    pub fn new(config: &ApiClientConfig) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            client,
            request_timeout: config.request_timeout,
        })
    }

    /// Build a GET request with bearer authentication.
    fn build_request(&self, url: &Url, token: &str) -> reqwest::RequestBuilder {
        let request = self.client.get(url.as_str());
        if token.is_empty() {
            request
        } else {
            request.bearer_auth(token)
        }
    }

    async fn send(request: reqwest::RequestBuilder, url: &Url) -> ApiResult<reqwest::Response> {
        tracing::debug!(%url, "GET");
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::ApiRequestFailed {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url, token: &str) -> ApiResult<T> {
        let request = self
            .build_request(url, token)
            .timeout(self.request_timeout);
        let response = Self::send(request, url).await?;
        let body = response.bytes().await?;
        let data: T = serde_json::from_slice(&body)?;
        Ok(data)
    }

    async fn get_stream(&self, url: &Url, token: &str) -> ApiResult<FileStream> {
        // No total timeout: large logs may legitimately take a while
        let response = Self::send(self.build_request(url, token), url).await?;
        let content_length = response.content_length();
        let chunks = response.bytes_stream().map_err(ApiError::from);
        Ok(FileStream {
            content_length,
            chunks: Box::pin(chunks),
        })
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================

#[cfg(any(test, feature = "test-utils"))]
pub mod testing {
    use super::*;
    use matchlog_core::Endpoint;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex, PoisonError};

    /// Size of the chunks the fake hands out.
    pub const FAKE_CHUNK: usize = 4096;

    /// Canned response for the fake backend.
    #[derive(Debug, Clone)]
    pub enum CannedResponse {
        /// JSON document (also served as a body by `get_stream`).
        Json(serde_json::Value),
        /// Raw body bytes.
        Body(Bytes),
        /// Body whose stream fails after `fail_after` bytes.
        BrokenBody { bytes: Bytes, fail_after: usize },
        /// Non-success HTTP status.
        Status(u16),
    }

    #[derive(Debug, Default)]
    struct InFlight {
        current: AtomicUsize,
        max: AtomicUsize,
    }

    /// Counts one open stream for as long as it lives.
    struct InFlightGuard(Arc<InFlight>);

    impl InFlightGuard {
        fn enter(counter: &Arc<InFlight>) -> Self {
            let now = counter.current.fetch_add(1, Ordering::SeqCst) + 1;
            counter.max.fetch_max(now, Ordering::SeqCst);
            Self(Arc::clone(counter))
        }
    }

    impl Drop for InFlightGuard {
        fn drop(&mut self) {
            self.0.current.fetch_sub(1, Ordering::SeqCst);
        }
    }

    struct BodyState {
        bytes: Bytes,
        offset: usize,
        fail_after: Option<usize>,
        delay: Option<Duration>,
        done: bool,
        _guard: InFlightGuard,
    }

    /// A fake HTTP backend that serves canned responses.
    ///
    /// URLs are matched by substring; when several registered fragments
    /// match, the longest wins. Unmatched URLs answer 404. Every call is
    /// recorded, and open streams are counted so tests can assert on
    /// transfer concurrency.
    pub struct FakeBackend {
        responses: Vec<(String, CannedResponse)>,
        calls: Mutex<Vec<String>>,
        in_flight: Arc<InFlight>,
        chunk_delay: Option<Duration>,
        content_length: bool,
    }

    impl Default for FakeBackend {
        fn default() -> Self {
            Self::new()
        }
    }

    impl FakeBackend {
        /// Create a new fake backend.
        pub fn new() -> Self {
            Self {
                responses: Vec::new(),
                calls: Mutex::new(Vec::new()),
                in_flight: Arc::new(InFlight::default()),
                chunk_delay: None,
                content_length: true,
            }
        }

        /// Add a canned response for a URL fragment.
        #[must_use]
        pub fn with_response(mut self, url_contains: &str, response: CannedResponse) -> Self {
            self.responses.push((url_contains.to_string(), response));
            self
        }

        #[must_use]
        pub fn with_json(self, url_contains: &str, json: serde_json::Value) -> Self {
            self.with_response(url_contains, CannedResponse::Json(json))
        }

        #[must_use]
        pub fn with_status(self, url_contains: &str, status: u16) -> Self {
            self.with_response(url_contains, CannedResponse::Status(status))
        }

        #[must_use]
        pub fn with_body(self, url_contains: &str, body: impl Into<Bytes>) -> Self {
            self.with_response(url_contains, CannedResponse::Body(body.into()))
        }

        /// Serve `body` but fail the stream after `fail_after` bytes.
        #[must_use]
        pub fn with_broken_body(
            self,
            url_contains: &str,
            body: impl Into<Bytes>,
            fail_after: usize,
        ) -> Self {
            self.with_response(
                url_contains,
                CannedResponse::BrokenBody {
                    bytes: body.into(),
                    fail_after,
                },
            )
        }

        /// Register `match_id` as existing for the gate.
        #[must_use]
        pub fn with_match(self, match_id: &str) -> Self {
            self.with_json(
                &format!("match/v1/match/{match_id}"),
                json!({ "match_id": match_id }),
            )
        }

        /// Register a listing for one endpoint plus a body per file.
        #[must_use]
        pub fn with_listing(self, match_id: &str, endpoint: Endpoint, files: &[(&str, &[u8])]) -> Self {
            let prefix = format!("file/v1/{}/match/{match_id}", endpoint.as_path_segment());
            let entries: Vec<serde_json::Value> = files
                .iter()
                .map(|(name, body)| json!({ "name": name, "size": body.len() }))
                .collect();
            let mut backend = self.with_json(&prefix, json!({ "files": entries }));
            for (name, body) in files {
                backend = backend.with_body(&format!("{prefix}/{name}"), body.to_vec());
            }
            backend
        }

        /// Sleep this long before every chunk (default: just yield).
        #[must_use]
        pub const fn with_chunk_delay(mut self, delay: Duration) -> Self {
            self.chunk_delay = Some(delay);
            self
        }

        /// Stop announcing a content length on streams.
        #[must_use]
        pub const fn without_content_length(mut self) -> Self {
            self.content_length = false;
            self
        }

        /// Every URL requested so far, in request order.
        pub fn calls(&self) -> Vec<String> {
            self.calls
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
        }

        /// Number of recorded calls whose URL contains `fragment`.
        pub fn calls_matching(&self, fragment: &str) -> usize {
            self.calls
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .iter()
                .filter(|u| u.contains(fragment))
                .count()
        }

        /// Highest number of simultaneously open streams observed.
        pub fn max_in_flight(&self) -> usize {
            self.in_flight.max.load(Ordering::SeqCst)
        }

        /// Streams currently open.
        pub fn in_flight(&self) -> usize {
            self.in_flight.current.load(Ordering::SeqCst)
        }

        fn record(&self, url: &Url) {
            self.calls
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(url.to_string());
        }

        fn find_response(&self, url: &Url) -> Option<CannedResponse> {
            let url = url.as_str();
            self.responses
                .iter()
                .filter(|(pattern, _)| matches_segment(url, pattern))
                .max_by_key(|(pattern, _)| pattern.len())
                .map(|(_, response)| response.clone())
        }

        fn not_found(url: &Url) -> ApiError {
            ApiError::ApiRequestFailed {
                status: 404,
                url: url.to_string(),
            }
        }

        fn open(&self, bytes: Bytes, fail_after: Option<usize>) -> FileStream {
            let content_length = self.content_length.then_some(bytes.len() as u64);
            let state = BodyState {
                bytes,
                offset: 0,
                fail_after,
                delay: self.chunk_delay,
                done: false,
                _guard: InFlightGuard::enter(&self.in_flight),
            };
            let chunks = futures_util::stream::unfold(state, |mut state| async move {
                if state.done {
                    return None;
                }
                match state.delay {
                    Some(delay) => tokio::time::sleep(delay).await,
                    None => tokio::task::yield_now().await,
                }
                let limit = state
                    .fail_after
                    .map_or(state.bytes.len(), |n| n.min(state.bytes.len()));
                if state.offset >= limit {
                    state.done = true;
                    if state.fail_after.is_some() {
                        let err = ApiError::InvalidResponse {
                            message: "connection reset mid-stream".to_string(),
                        };
                        return Some((Err(err), state));
                    }
                    return None;
                }
                let end = (state.offset + FAKE_CHUNK).min(limit);
                let chunk = state.bytes.slice(state.offset..end);
                state.offset = end;
                Some((Ok(chunk), state))
            });
            FileStream {
                content_length,
                chunks: Box::pin(chunks),
            }
        }
    }

    /// `pattern` occurs in `url` and ends a path segment there, so
    /// `match/M4` does not answer for `match/M404`.
    fn matches_segment(url: &str, pattern: &str) -> bool {
        url.match_indices(pattern).any(|(start, _)| {
            url[start + pattern.len()..]
                .chars()
                .next()
                .is_none_or(|c| matches!(c, '/' | '?' | '#'))
        })
    }

    #[async_trait]
    impl HttpBackend for FakeBackend {
        async fn get_json<T: DeserializeOwned + Send>(
            &self,
            url: &Url,
            _token: &str,
        ) -> ApiResult<T> {
            self.record(url);
            match self.find_response(url).ok_or_else(|| Self::not_found(url))? {
                CannedResponse::Json(json) => serde_json::from_value(json).map_err(Into::into),
                CannedResponse::Body(bytes) | CannedResponse::BrokenBody { bytes, .. } => {
                    serde_json::from_slice(&bytes).map_err(Into::into)
                }
                CannedResponse::Status(status) => Err(ApiError::ApiRequestFailed {
                    status,
                    url: url.to_string(),
                }),
            }
        }

        async fn get_stream(&self, url: &Url, _token: &str) -> ApiResult<FileStream> {
            self.record(url);
            match self.find_response(url).ok_or_else(|| Self::not_found(url))? {
                CannedResponse::Json(json) => Ok(self.open(Bytes::from(json.to_string()), None)),
                CannedResponse::Body(bytes) => Ok(self.open(bytes, None)),
                CannedResponse::BrokenBody { bytes, fail_after } => {
                    Ok(self.open(bytes, Some(fail_after)))
                }
                CannedResponse::Status(status) => Err(ApiError::ApiRequestFailed {
                    status,
                    url: url.to_string(),
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reqwest_backend_creation() {
        let config = ApiClientConfig::default();
        let backend = ReqwestBackend::new(&config).unwrap();
        assert_eq!(backend.request_timeout, Duration::from_secs(30));
    }

    mod fake_backend_tests {
        use super::super::testing::*;
        use super::*;
        use futures_util::StreamExt;
        use matchlog_core::Endpoint;
        use serde_json::json;

        async fn collect(stream: FileStream) -> (Vec<u8>, Option<ApiError>) {
            let mut body = Vec::new();
            let mut chunks = stream.chunks;
            while let Some(chunk) = chunks.next().await {
                match chunk {
                    Ok(bytes) => body.extend_from_slice(&bytes),
                    Err(e) => return (body, Some(e)),
                }
            }
            (body, None)
        }

        #[tokio::test]
        async fn test_fake_backend_returns_canned_json() {
            let backend = FakeBackend::new().with_json("match/v1/match/M1", json!({"id": "M1"}));
            let url = Url::parse("https://example.com/match/v1/match/M1").unwrap();
            let result: serde_json::Value = backend.get_json(&url, "t").await.unwrap();
            assert_eq!(result["id"], "M1");
            assert_eq!(backend.calls(), vec![url.to_string()]);
        }

        #[tokio::test]
        async fn test_fake_backend_returns_404_for_unknown_url() {
            let backend = FakeBackend::new();
            let url = Url::parse("https://example.com/unknown").unwrap();
            let result: ApiResult<serde_json::Value> = backend.get_json(&url, "t").await;
            assert!(matches!(
                result,
                Err(ApiError::ApiRequestFailed { status: 404, .. })
            ));
        }

        #[tokio::test]
        async fn test_longest_fragment_wins() {
            let backend = FakeBackend::new()
                .with_status("file/v1/file/match/M1", 500)
                .with_body("file/v1/file/match/M1/a.log", "hello");
            let url = Url::parse("https://x/file/v1/file/match/M1/a.log").unwrap();
            let stream = backend.get_stream(&url, "t").await.unwrap();
            assert_eq!(stream.content_length, Some(5));
            let (body, err) = collect(stream).await;
            assert_eq!(body, b"hello");
            assert!(err.is_none());
        }

        #[tokio::test]
        async fn test_fragment_must_end_a_path_segment() {
            let backend = FakeBackend::new().with_match("M4");
            let m4 = Url::parse("https://x/match/v1/match/M4").unwrap();
            let m404 = Url::parse("https://x/match/v1/match/M404").unwrap();
            assert!(backend.get_json::<serde_json::Value>(&m4, "t").await.is_ok());
            let err = backend
                .get_json::<serde_json::Value>(&m404, "t")
                .await
                .unwrap_err();
            assert!(err.is_not_found());

            let listed =
                FakeBackend::new().with_listing("M4", Endpoint::Primary, &[("a.log", &b"a"[..])]);
            let file = Url::parse("https://x/file/v1/file/match/M4/a.log").unwrap();
            let other = Url::parse("https://x/file/v1/file/match/M404/a.log").unwrap();
            assert!(listed.get_stream(&file, "t").await.is_ok());
            assert!(listed.get_stream(&other, "t").await.is_err());
        }

        #[tokio::test]
        async fn test_broken_body_fails_mid_stream() {
            let payload = vec![7u8; FAKE_CHUNK * 3];
            let backend = FakeBackend::new().with_broken_body("a.log", payload, FAKE_CHUNK + 10);
            let url = Url::parse("https://x/a.log").unwrap();
            let stream = backend.get_stream(&url, "t").await.unwrap();
            assert_eq!(backend.in_flight(), 1);
            let (body, err) = collect(stream).await;
            assert_eq!(body.len(), FAKE_CHUNK + 10);
            assert!(err.is_some());
            assert_eq!(backend.in_flight(), 0);
            assert_eq!(backend.max_in_flight(), 1);
        }

        #[tokio::test]
        async fn test_without_content_length() {
            let backend = FakeBackend::new()
                .with_body("a.log", "abc")
                .without_content_length();
            let url = Url::parse("https://x/a.log").unwrap();
            let stream = backend.get_stream(&url, "t").await.unwrap();
            assert_eq!(stream.content_length, None);
        }
    }
}
