//! Subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use matchlog_core::{Endpoint, FileType, NamingScheme};

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Check whether a match exists
    Exists {
        match_id: String,
    },

    /// List a match's files across endpoints
    List {
        match_id: String,
        /// Only list one endpoint (file | developer-file)
        #[arg(long)]
        endpoint: Option<Endpoint>,
        /// Only show files of this type (e.g. CHAT_LOG)
        #[arg(long = "type")]
        file_type: Option<FileType>,
        /// Only show files whose name contains this session id
        #[arg(long)]
        session: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Download every file of one type
    Get {
        match_id: String,
        #[arg(long = "type")]
        file_type: FileType,
        #[arg(long)]
        session: Option<String>,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Download a single session's log
    SessionLog {
        match_id: String,
        #[arg(long = "type", default_value = "COMBAT_LOG")]
        file_type: FileType,
        #[arg(long)]
        session: Option<String>,
        /// Output directory [default: match_files/<match_id>]
        #[arg(long, env = "MATCHLOG_OUTPUT_DIR")]
        out: Option<PathBuf>,
    },

    /// Download every file of a match
    All {
        match_id: String,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Download by friendly category (ChatLog, CombatLog, Diagnostics, ...)
    Categories {
        match_id: String,
        /// Category names, or "All"
        #[arg(default_value = "All")]
        names: Vec<String>,
        #[arg(long)]
        session: Option<String>,
        /// Output directory [default: match_files/<match_id>]
        #[arg(long, env = "MATCHLOG_OUTPUT_DIR")]
        out: Option<PathBuf>,
    },

    /// Download several types, optionally falling back to everything
    Fetch {
        match_id: String,
        #[command(flatten)]
        types: TypeArgs,
        #[arg(long)]
        session: Option<String>,
        /// Print the first lines of each downloaded text file
        #[arg(long)]
        preview: bool,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Download logs for every match in an exported match list
    Batch {
        /// JSON file holding an array of match records
        matches_file: PathBuf,
        #[arg(long)]
        region: Option<String>,
        /// Case-insensitive substring of the game mode
        #[arg(long = "game-mode")]
        game_mode: Option<String>,
        /// Minimum duration in seconds
        #[arg(long = "min-duration")]
        min_duration: Option<u64>,
        /// Maximum duration in seconds
        #[arg(long = "max-duration")]
        max_duration: Option<u64>,
        #[arg(long = "host-type")]
        host_type: Option<String>,
        #[arg(long)]
        map: Option<String>,
        /// Process at most this many matches
        #[arg(long)]
        limit: Option<usize>,
        #[command(flatten)]
        types: TypeArgs,
        /// Output directory [default: chat_logs]
        #[arg(long, env = "MATCHLOG_OUTPUT_DIR")]
        out: Option<PathBuf>,
    },

    /// Decode downloaded logs into JSON rows
    Parse {
        kind: LogKindArg,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

/// Where and how downloaded files are written.
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output directory [default: match_files/<match_id>]
    #[arg(long, env = "MATCHLOG_OUTPUT_DIR")]
    pub out: Option<PathBuf>,

    /// Prefix saved file names with the match id
    #[arg(long = "prefix-match-id")]
    pub prefix_match_id: bool,
}

impl OutputArgs {
    pub const fn naming(&self) -> NamingScheme {
        if self.prefix_match_id {
            NamingScheme::MatchPrefixed
        } else {
            NamingScheme::Bare
        }
    }
}

/// File types to download, with the fallback switch.
#[derive(Args, Debug, Clone)]
pub struct TypeArgs {
    /// Comma-separated file types (e.g. COMBAT_LOG,CHAT_LOG)
    #[arg(long, value_delimiter = ',', required = true)]
    pub types: Vec<FileType>,

    /// Download every file when none of the types exist
    #[arg(long = "fallback-all")]
    pub fallback_all: bool,
}

/// Decodable log kinds.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKindArg {
    Combat,
    Chat,
}
