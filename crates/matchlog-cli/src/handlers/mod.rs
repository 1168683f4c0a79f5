//! Command handlers.
//!
//! Handlers are thin: they turn CLI arguments into calls on the retrieval
//! facade and format the result for the terminal. They are generic over the
//! HTTP backend so tests can drive them with an in-memory one.

pub mod all;
pub mod batch;
pub mod categories;
pub mod exists;
pub mod fetch;
pub mod get;
pub mod list;
pub mod parse;
pub mod session_log;

use std::path::PathBuf;
use std::sync::Arc;

use matchlog_core::NamingScheme;
use matchlog_download::FetchOptions;

use crate::presentation::CliProgress;

/// Fetch options with a progress display attached.
pub(crate) fn fetch_options(naming: NamingScheme, progress: &Arc<CliProgress>) -> FetchOptions {
    FetchOptions::new()
        .with_naming(naming)
        .with_optional_progress(Some(progress.callback()))
}

/// Print one saved path per line.
pub(crate) fn print_paths(paths: &[PathBuf]) {
    for path in paths {
        println!("{}", path.display());
    }
}
