//! `get`: download every file of one type.

use std::path::PathBuf;

use anyhow::Result;
use matchlog_api::HttpBackend;
use matchlog_core::FileType;

use crate::bootstrap::{CliContext, match_output_dir};
use crate::commands::OutputArgs;
use crate::error::CliError;
use crate::handlers::{fetch_options, print_paths};
use crate::presentation::CliProgress;

pub async fn execute<B: HttpBackend>(
    ctx: &CliContext<B>,
    match_id: &str,
    file_type: FileType,
    session: Option<&str>,
    output: &OutputArgs,
) -> Result<Vec<PathBuf>> {
    let out = match_output_dir(output.out.as_deref(), match_id);
    let progress = CliProgress::new();
    let result = ctx
        .retrieval
        .download_by_type(
            match_id,
            file_type,
            session,
            &out,
            ctx.token(),
            &fetch_options(output.naming(), &progress),
        )
        .await;
    progress.finish();

    let paths = result.map_err(CliError::from)?;
    print_paths(&paths);
    Ok(paths)
}
