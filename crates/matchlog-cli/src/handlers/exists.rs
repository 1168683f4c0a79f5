//! `exists`: run the existence check only.

use anyhow::Result;
use matchlog_api::HttpBackend;

use crate::bootstrap::CliContext;
use crate::error::CliError;

pub async fn execute<B: HttpBackend>(ctx: &CliContext<B>, match_id: &str) -> Result<()> {
    ctx.retrieval
        .client()
        .ensure_match_exists(match_id, ctx.token())
        .await
        .map_err(CliError::from)?;
    println!("Match '{match_id}' exists");
    Ok(())
}
