//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "syncwatch")]
#[command(version, about = "Inspect sync logs and status, or serve them over HTTP")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (defaults to ~/.config/syncwatch/config.toml)
    #[arg(short, long, env = "SYNCWATCH_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output in JSON format instead of tables
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the Web API server
    Serve(ServeArgs),

    /// List the logs currently available
    List,

    /// Show the last lines of a log
    Tail(TailArgs),

    /// Show the sync status
    Status,

    /// Copy a log to a local file
    Download(DownloadArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// Address to bind (overrides [web].bind)
    #[arg(long)]
    pub bind: Option<String>,

    /// API key for authentication (overrides [web].api_key)
    #[arg(long, env = "SYNCWATCH_API_KEY")]
    pub api_key: Option<String>,
}

#[derive(Args)]
pub struct TailArgs {
    /// Log key (see `syncwatch list`)
    pub key: String,

    /// Number of lines (clamped to 1..=1000)
    #[arg(short = 'n', long, default_value = "100")]
    pub lines: usize,
}

#[derive(Args)]
pub struct DownloadArgs {
    /// Log key (see `syncwatch list`)
    pub key: String,

    /// Output file (defaults to the log's file name in the current directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
