//! `session-log`: download one session's log.

use std::path::{Path, PathBuf};

use anyhow::Result;
use matchlog_api::HttpBackend;
use matchlog_core::FileType;

use crate::bootstrap::{CliContext, match_output_dir};
use crate::error::CliError;
use crate::presentation::CliProgress;

pub async fn execute<B: HttpBackend>(
    ctx: &CliContext<B>,
    match_id: &str,
    file_type: FileType,
    session: Option<&str>,
    out: Option<&Path>,
) -> Result<PathBuf> {
    let out = match_output_dir(out, match_id);
    let progress = CliProgress::new();
    let callback = progress.callback();
    let result = ctx
        .retrieval
        .download_session_log(match_id, file_type, session, &out, ctx.token(), Some(&callback))
        .await;
    progress.finish();

    let path = result.map_err(CliError::from)?;
    println!("{}", path.display());
    Ok(path)
}
