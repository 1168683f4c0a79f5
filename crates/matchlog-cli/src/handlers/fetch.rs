//! `fetch`: several types with optional fallback and preview.

use std::path::PathBuf;

use anyhow::Result;
use matchlog_api::HttpBackend;

use crate::bootstrap::{CliContext, match_output_dir};
use crate::commands::{OutputArgs, TypeArgs};
use crate::error::CliError;
use crate::handlers::{fetch_options, print_paths};
use crate::presentation::{CliProgress, print_previews};

pub async fn execute<B: HttpBackend>(
    ctx: &CliContext<B>,
    match_id: &str,
    types: &TypeArgs,
    session: Option<&str>,
    preview: bool,
    output: &OutputArgs,
) -> Result<Vec<PathBuf>> {
    let out = match_output_dir(output.out.as_deref(), match_id);
    let progress = CliProgress::new();
    let result = ctx
        .retrieval
        .download_types_with_fallback(
            match_id,
            &types.types,
            session,
            &out,
            ctx.token(),
            types.fallback_all,
            &fetch_options(output.naming(), &progress),
        )
        .await;
    progress.finish();

    let paths = result.map_err(CliError::from)?;
    if paths.is_empty() {
        println!("No matching files for match '{match_id}'.");
    }
    print_paths(&paths);
    if preview {
        print_previews(&paths);
    }
    Ok(paths)
}
