//! SyncWatch CLI - sync log and status inspection

use anyhow::Result;
use clap::Parser;
use syncwatch_core::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod output;

use cli::{Cli, Commands};
use commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    output::set_json_mode(cli.json);

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "syncwatch={0},syncwatch_logs={0},syncwatch_health={0},syncwatch_web={0},tower_http={0}",
                    log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };

    let result = match config {
        Ok(config) => match cli.command {
            Commands::Serve(args) => serve::execute(config, args).await,
            Commands::List => list::execute(&config),
            Commands::Tail(args) => tail::execute(&config, args),
            Commands::Status => status::execute(&config),
            Commands::Download(args) => download::execute(&config, args),
        },
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }

    Ok(())
}
