//! `list`: show a match's files.

use anyhow::Result;
use matchlog_api::HttpBackend;
use matchlog_core::{Endpoint, FileDescriptor, FileFilter, FileType};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::print_descriptor_table;

#[derive(Debug, Clone)]
pub struct ListArgs {
    pub match_id: String,
    pub endpoint: Option<Endpoint>,
    pub file_type: Option<FileType>,
    pub session: Option<String>,
    pub json: bool,
}

/// The filtered listing.
pub async fn files<B: HttpBackend>(
    ctx: &CliContext<B>,
    args: &ListArgs,
) -> Result<Vec<FileDescriptor>, CliError> {
    let client = ctx.retrieval.client();
    let listing = match args.endpoint {
        Some(endpoint) => {
            client
                .list_endpoints(&args.match_id, ctx.token(), &[endpoint])
                .await?
        }
        None => {
            ctx.retrieval
                .list_all_match_files(&args.match_id, ctx.token())
                .await?
        }
    };

    let mut filter = FileFilter::new().with_session(args.session.as_deref());
    if let Some(file_type) = args.file_type {
        filter = filter.with_type(file_type);
    }
    tracing::debug!(filter = %filter.description(), "Filtering listing");
    Ok(filter.apply(&listing))
}

pub async fn execute<B: HttpBackend>(ctx: &CliContext<B>, args: &ListArgs) -> Result<()> {
    let files = files(ctx, args).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&files)?);
        return Ok(());
    }
    if files.is_empty() {
        println!("No files found for match '{}'.", args.match_id);
        return Ok(());
    }
    print_descriptor_table(&files);
    println!("\n{} file(s)", files.len());
    Ok(())
}
