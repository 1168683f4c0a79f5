//! Root CLI structure and global options.

use clap::Parser;

use matchlog_download::DEFAULT_MAX_CONCURRENCY;

use crate::commands::Commands;

/// Find and download match log files.
#[derive(Parser)]
#[command(name = "matchlog")]
#[command(about = "Find, download and decode match log files")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub globals: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Options shared by every subcommand.
#[derive(clap::Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Backend base URL
    #[arg(long = "base-url", env = "RH_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Bearer token for the backend
    #[arg(long, env = "RH_ACCESS_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Maximum simultaneous downloads
    #[arg(short = 'j', long, default_value_t = DEFAULT_MAX_CONCURRENCY, global = true)]
    pub jobs: usize,

    /// Download one file at a time, in listing order
    #[arg(long, global = true)]
    pub sequential: bool,
}

impl GlobalArgs {
    /// Effective concurrency after `--sequential`.
    pub const fn concurrency(&self) -> usize {
        if self.sequential { 1 } else { self.jobs }
    }
}
