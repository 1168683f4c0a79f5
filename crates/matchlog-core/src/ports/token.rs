//! Access token port.
//!
//! The token is obtained once per top-level call and passed explicitly to
//! every listing and download operation. Refresh and expiry are the
//! caller's concern.

use async_trait::async_trait;
use thiserror::Error;

/// Environment variable consulted by [`EnvTokenProvider`] by default.
pub const TOKEN_ENV_VAR: &str = "RH_ACCESS_TOKEN";

/// Errors that can occur while obtaining a token.
#[derive(Debug, Error)]
pub enum TokenError {
    /// No token is configured.
    #[error("No access token available: set {0} or pass --token")]
    Missing(String),

    /// The provider failed to produce a token.
    #[error("Token provider failed: {0}")]
    Provider(String),
}

/// Source of an opaque bearer token.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Produce a token for the current call.
    async fn token(&self) -> Result<String, TokenError>;
}

/// Provider that always returns the same token.
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn token(&self) -> Result<String, TokenError> {
        Ok(self.token.clone())
    }
}

/// Provider that reads the token from an environment variable.
#[derive(Debug, Clone)]
pub struct EnvTokenProvider {
    var: String,
}

impl Default for EnvTokenProvider {
    fn default() -> Self {
        Self::new(TOKEN_ENV_VAR)
    }
}

impl EnvTokenProvider {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

#[async_trait]
impl TokenProvider for EnvTokenProvider {
    async fn token(&self) -> Result<String, TokenError> {
        std::env::var(&self.var)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| TokenError::Missing(self.var.clone()))
    }
}

/// Use `explicit` if given, otherwise ask `provider` once.
pub async fn resolve_token(
    explicit: Option<String>,
    provider: &dyn TokenProvider,
) -> Result<String, TokenError> {
    if let Some(token) = explicit.filter(|t| !t.is_empty()) {
        return Ok(token);
    }
    tracing::debug!("No explicit token, asking provider");
    provider.token().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_explicit_token_wins() {
        let mut provider = MockTokenProvider::new();
        provider.expect_token().never();

        let token = resolve_token(Some("explicit".to_string()), &provider)
            .await
            .unwrap();
        assert_eq!(token, "explicit");
    }

    #[tokio::test]
    async fn test_provider_asked_once_without_explicit() {
        let mut provider = MockTokenProvider::new();
        provider
            .expect_token()
            .times(1)
            .returning(|| Ok("from-provider".to_string()));

        let token = resolve_token(None, &provider).await.unwrap();
        assert_eq!(token, "from-provider");
    }

    #[tokio::test]
    async fn test_empty_explicit_falls_back() {
        let provider = StaticTokenProvider::new("static");
        let token = resolve_token(Some(String::new()), &provider).await.unwrap();
        assert_eq!(token, "static");
    }

    #[tokio::test]
    async fn test_provider_error_propagates() {
        let mut provider = MockTokenProvider::new();
        provider
            .expect_token()
            .returning(|| Err(TokenError::Provider("boom".to_string())));

        let err = resolve_token(None, &provider).await.unwrap_err();
        assert!(err.to_string().contains("boom"));
    }

    #[tokio::test]
    async fn test_env_provider_missing_var() {
        let provider = EnvTokenProvider::new("MATCHLOG_TOKEN_THAT_IS_NEVER_SET");
        let err = provider.token().await.unwrap_err();
        assert!(matches!(err, TokenError::Missing(ref v) if v == "MATCHLOG_TOKEN_THAT_IS_NEVER_SET"));
    }
}
