//! `categories`: download by friendly category and print the saved map.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use matchlog_api::HttpBackend;
use matchlog_core::NamingScheme;

use crate::bootstrap::{CliContext, match_output_dir};
use crate::error::CliError;
use crate::handlers::fetch_options;
use crate::presentation::CliProgress;

pub async fn execute<B: HttpBackend>(
    ctx: &CliContext<B>,
    match_id: &str,
    names: &[String],
    session: Option<&str>,
    out: Option<&Path>,
) -> Result<BTreeMap<String, PathBuf>> {
    let out = match_output_dir(out, match_id);
    let progress = CliProgress::new();
    let result = ctx
        .retrieval
        .download_friendly_categories(
            match_id,
            names,
            session,
            &out,
            ctx.token(),
            &fetch_options(NamingScheme::Bare, &progress),
        )
        .await;
    progress.finish();

    let saved: BTreeMap<String, PathBuf> = result.map_err(CliError::from)?.into_iter().collect();
    println!("{}", serde_json::to_string_pretty(&saved)?);
    Ok(saved)
}
