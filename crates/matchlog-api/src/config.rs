//! Public configuration for the backend client.

use std::time::Duration;

/// Default backend base URL.
pub const DEFAULT_BASE_URL: &str = "https://demo.rally-here.io";

/// Configuration for the match files client.
///
/// Use the builder pattern methods to customize the client configuration.
///
/// # Example
///
/// ```
/// use matchlog_api::ApiClientConfig;
/// use std::time::Duration;
///
/// let config = ApiClientConfig::new()
///     .with_base_url("https://staging.example.com")
///     .with_request_timeout(Duration::from_secs(60));
/// ```
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL of the backend
    pub(crate) base_url: String,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Timeout for establishing a connection
    pub(crate) connect_timeout: Duration,
    /// Total timeout for JSON requests (file streams are not bounded)
    pub(crate) request_timeout: Duration,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: concat!("matchlog/", env!("CARGO_PKG_VERSION")).to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ApiClientConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL of the backend.
    ///
    /// Defaults to `https://demo.rally-here.io`.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the base URL only when one is given.
    #[must_use]
    pub fn with_optional_base_url(self, url: Option<String>) -> Self {
        match url {
            Some(url) => self.with_base_url(url),
            None => self,
        }
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the connect timeout.
    ///
    /// Defaults to 10 seconds.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the timeout for JSON requests.
    ///
    /// Defaults to 30 seconds.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ApiClientConfig::new();
        assert_eq!(config.base_url, "https://demo.rally-here.io");
        assert!(config.user_agent.starts_with("matchlog/"));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_builder_pattern() {
        let config = ApiClientConfig::new()
            .with_base_url("https://custom.api/")
            .with_user_agent("test-agent")
            .with_connect_timeout(Duration::from_secs(2))
            .with_request_timeout(Duration::from_secs(60));

        assert_eq!(config.base_url(), "https://custom.api/");
        assert_eq!(config.user_agent, "test-agent");
        assert_eq!(config.connect_timeout, Duration::from_secs(2));
        assert_eq!(config.request_timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_optional_base_url() {
        let kept = ApiClientConfig::new().with_optional_base_url(None);
        assert_eq!(kept.base_url(), DEFAULT_BASE_URL);

        let replaced = ApiClientConfig::new().with_optional_base_url(Some("https://x".into()));
        assert_eq!(replaced.base_url(), "https://x");
    }
}
