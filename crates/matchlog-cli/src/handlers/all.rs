//! `all`: download every file of a match.

use std::path::PathBuf;

use anyhow::Result;
use matchlog_api::HttpBackend;

use crate::bootstrap::{CliContext, match_output_dir};
use crate::commands::OutputArgs;
use crate::error::CliError;
use crate::handlers::{fetch_options, print_paths};
use crate::presentation::CliProgress;

pub async fn execute<B: HttpBackend>(
    ctx: &CliContext<B>,
    match_id: &str,
    output: &OutputArgs,
) -> Result<Vec<PathBuf>> {
    let out = match_output_dir(output.out.as_deref(), match_id);
    let progress = CliProgress::new();
    let result = ctx
        .retrieval
        .download_all(
            match_id,
            &out,
            ctx.token(),
            &fetch_options(output.naming(), &progress),
        )
        .await;
    progress.finish();

    let paths = result.map_err(CliError::from)?;
    if paths.is_empty() {
        println!("No files downloaded for match '{match_id}'.");
    }
    print_paths(&paths);
    Ok(paths)
}
