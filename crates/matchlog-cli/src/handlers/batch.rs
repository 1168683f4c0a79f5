//! `batch`: download logs for many matches from an exported match list.

use std::path::PathBuf;

use anyhow::{Context, Result};
use matchlog_api::HttpBackend;
use matchlog_core::{FileType, MatchFilter, MatchRecord, NamingScheme};
use tracing::{info, warn};

use crate::bootstrap::{CliContext, DEFAULT_BATCH_DIR};
use crate::error::CliError;
use crate::handlers::{fetch_options, print_paths};
use crate::presentation::CliProgress;

#[derive(Debug, Clone, Default)]
pub struct BatchArgs {
    pub matches_file: PathBuf,
    pub region: Option<String>,
    pub game_mode: Option<String>,
    pub min_duration: Option<u64>,
    pub max_duration: Option<u64>,
    pub host_type: Option<String>,
    pub map: Option<String>,
    pub limit: Option<usize>,
    pub types: Vec<FileType>,
    pub fallback_all: bool,
    pub out: Option<PathBuf>,
}

impl BatchArgs {
    /// All given criteria combined with AND; no criteria keeps every match.
    pub fn filter(&self) -> MatchFilter {
        let mut filters = Vec::new();
        if self.min_duration.is_some() || self.max_duration.is_some() {
            filters.push(MatchFilter::Duration {
                min: self.min_duration,
                max: self.max_duration,
            });
        }
        if let Some(region) = &self.region {
            filters.push(MatchFilter::Region(region.clone()));
        }
        if let Some(mode) = &self.game_mode {
            filters.push(MatchFilter::GameMode(mode.clone()));
        }
        if let Some(host) = &self.host_type {
            filters.push(MatchFilter::HostType(host.clone()));
        }
        if let Some(map) = &self.map {
            filters.push(MatchFilter::Map(map.clone()));
        }
        MatchFilter::All(filters)
    }
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub considered: usize,
    pub with_files: usize,
    pub paths: Vec<PathBuf>,
}

/// Records from the list file that pass the filter, capped at `limit`.
pub fn select_matches(args: &BatchArgs) -> Result<Vec<MatchRecord>> {
    let text = std::fs::read_to_string(&args.matches_file)
        .with_context(|| format!("Failed to read {}", args.matches_file.display()))?;
    let records = MatchRecord::parse_list(&text).map_err(|e| {
        CliError::Arguments(format!(
            "{} is not a match list: {e}",
            args.matches_file.display()
        ))
    })?;
    let total = records.len();
    let filter = args.filter();
    let mut selected = filter.apply(records);
    if let Some(limit) = args.limit {
        selected.truncate(limit);
    }
    info!(
        total,
        selected = selected.len(),
        filter = %filter.description(),
        "Selected matches"
    );
    Ok(selected)
}

pub async fn execute<B: HttpBackend>(ctx: &CliContext<B>, args: &BatchArgs) -> Result<BatchSummary> {
    let matches = select_matches(args)?;
    let out = args
        .out
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_BATCH_DIR));
    let progress = CliProgress::new();
    let options = fetch_options(NamingScheme::MatchPrefixed, &progress);

    let mut summary = BatchSummary {
        considered: matches.len(),
        ..BatchSummary::default()
    };
    for (i, record) in matches.iter().enumerate() {
        info!(
            match_id = %record.match_id,
            session = record.first_session_id().unwrap_or("--"),
            duration_s = record.duration_seconds,
            "Processing match {}/{}",
            i + 1,
            summary.considered
        );
        match ctx
            .retrieval
            .download_types_with_fallback(
                &record.match_id,
                &args.types,
                None,
                &out,
                ctx.token(),
                args.fallback_all,
                &options,
            )
            .await
        {
            Ok(paths) if paths.is_empty() => {}
            Ok(paths) => {
                summary.with_files += 1;
                summary.paths.extend(paths);
            }
            Err(e) => warn!(match_id = %record.match_id, error = %e, "Skipping match"),
        }
    }
    progress.finish();

    print_paths(&summary.paths);
    println!(
        "Found files for {} of {} match(es); {} file(s) saved to {}",
        summary.with_files,
        summary.considered,
        summary.paths.len(),
        out.display()
    );
    Ok(summary)
}
