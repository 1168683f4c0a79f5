//! CLI bootstrap, the composition root.
//!
//! Builds the HTTP backend, client and retrieval facade from the global
//! options and resolves the access token once.

use std::path::{Path, PathBuf};

use matchlog_api::{ApiClientConfig, HttpBackend, MatchFilesClient, ReqwestBackend};
use matchlog_core::{EnvTokenProvider, resolve_token};
use matchlog_download::{DownloaderConfig, MatchFileRetrieval};

use crate::error::CliError;
use crate::parser::GlobalArgs;

/// Root directory for single-match downloads.
pub const DEFAULT_MATCH_DIR: &str = "match_files";

/// Output directory for the batch command.
pub const DEFAULT_BATCH_DIR: &str = "chat_logs";

/// Configuration distilled from the global options.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub api: ApiClientConfig,
    pub downloader: DownloaderConfig,
    pub token: Option<String>,
}

impl CliConfig {
    pub fn from_globals(globals: &GlobalArgs) -> Self {
        Self {
            api: ApiClientConfig::new().with_optional_base_url(globals.base_url.clone()),
            downloader: DownloaderConfig::new().with_max_concurrency(globals.concurrency()),
            token: globals.token.clone(),
        }
    }
}

/// Everything a command handler needs.
pub struct CliContext<B: HttpBackend = ReqwestBackend> {
    pub retrieval: MatchFileRetrieval<B>,
    pub token: String,
}

impl<B: HttpBackend> CliContext<B> {
    pub fn new(client: MatchFilesClient<B>, downloader: DownloaderConfig, token: String) -> Self {
        Self {
            retrieval: MatchFileRetrieval::new(client, downloader),
            token,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Wire the real backend.
pub async fn bootstrap(config: CliConfig) -> Result<CliContext, CliError> {
    let token = resolve_token(config.token, &EnvTokenProvider::default()).await?;
    let client = MatchFilesClient::new(&config.api)?;
    tracing::debug!(base_url = %client.base_url(), "Client ready");
    Ok(CliContext::new(client, config.downloader, token))
}

/// `out`, or `match_files/<match_id>`.
pub fn match_output_dir(out: Option<&Path>, match_id: &str) -> PathBuf {
    out.map_or_else(|| Path::new(DEFAULT_MATCH_DIR).join(match_id), Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_default_output_dir() {
        assert_eq!(
            match_output_dir(None, "M1"),
            PathBuf::from("match_files").join("M1")
        );
        assert_eq!(
            match_output_dir(Some(Path::new("/tmp/x")), "M1"),
            PathBuf::from("/tmp/x")
        );
    }

    #[test]
    fn test_config_from_globals() {
        let cli = crate::Cli::parse_from([
            "matchlog",
            "--base-url",
            "https://gw.example.com",
            "--sequential",
            "exists",
            "M1",
        ]);
        let config = CliConfig::from_globals(&cli.globals);
        assert_eq!(config.api.base_url(), "https://gw.example.com");
        assert!(config.downloader.is_sequential());
    }
}
