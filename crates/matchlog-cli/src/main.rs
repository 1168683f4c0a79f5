//! CLI entry point, the composition root.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};

use matchlog_cli::handlers::{self, batch::BatchArgs, list::ListArgs};
use matchlog_cli::{Cli, CliConfig, Commands, bootstrap, exit_code_for, logging};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    logging::init(cli.globals.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(u8::try_from(exit_code_for(&e)).unwrap_or(1))
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    // Decoding is local; everything else needs the backend and a token.
    if let Commands::Parse { kind, files } = &command {
        return handlers::parse::execute(*kind, files);
    }
    let ctx = bootstrap(CliConfig::from_globals(&cli.globals)).await?;

    match command {
        Commands::Exists { match_id } => handlers::exists::execute(&ctx, &match_id).await?,
        Commands::List {
            match_id,
            endpoint,
            file_type,
            session,
            json,
        } => {
            let args = ListArgs {
                match_id,
                endpoint,
                file_type,
                session,
                json,
            };
            handlers::list::execute(&ctx, &args).await?;
        }
        Commands::Get {
            match_id,
            file_type,
            session,
            output,
        } => {
            handlers::get::execute(&ctx, &match_id, file_type, session.as_deref(), &output)
                .await?;
        }
        Commands::SessionLog {
            match_id,
            file_type,
            session,
            out,
        } => {
            handlers::session_log::execute(
                &ctx,
                &match_id,
                file_type,
                session.as_deref(),
                out.as_deref(),
            )
            .await?;
        }
        Commands::All { match_id, output } => {
            handlers::all::execute(&ctx, &match_id, &output).await?;
        }
        Commands::Categories {
            match_id,
            names,
            session,
            out,
        } => {
            handlers::categories::execute(
                &ctx,
                &match_id,
                &names,
                session.as_deref(),
                out.as_deref(),
            )
            .await?;
        }
        Commands::Fetch {
            match_id,
            types,
            session,
            preview,
            output,
        } => {
            handlers::fetch::execute(&ctx, &match_id, &types, session.as_deref(), preview, &output)
                .await?;
        }
        Commands::Batch {
            matches_file,
            region,
            game_mode,
            min_duration,
            max_duration,
            host_type,
            map,
            limit,
            types,
            out,
        } => {
            let args = BatchArgs {
                matches_file,
                region,
                game_mode,
                min_duration,
                max_duration,
                host_type,
                map,
                limit,
                types: types.types,
                fallback_all: types.fallback_all,
                out,
            };
            handlers::batch::execute(&ctx, &args).await?;
        }
        Commands::Parse { kind, files } => handlers::parse::execute(kind, &files)?,
    }
    Ok(())
}
