mod consume;
mod replay;
mod report;
mod shell;
mod transaction;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use workload_core::{InMemoryWorkloadStore, MonthKeyStyle, WorkloadConfig, WorkloadService};

#[derive(Parser)]
#[command(name = "workload")]
#[command(about = "Aggregates trainers' monthly working hours from training session events", long_about = None)]
struct Cli {
    /// Config file (defaults to ~/.workload/config.json when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Month key written for sessions: "name" (MARCH) or "number" (3)
    #[arg(long, global = true)]
    month_key: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Apply a JSON array of session events and print the resulting totals
    Replay {
        /// Path to the events file
        file: PathBuf,
    },
    /// Read events and queries as NDJSON from stdin, answer on stdout
    Consume,
    /// Interactive line shell (default)
    Shell,
}

fn init_tracing(default_filter: &str) {
    // stdout carries command output, logs go to stderr
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = WorkloadConfig::load(cli.config.as_deref())?;
    if let Some(style) = &cli.month_key {
        config.month_key = style.parse::<MonthKeyStyle>()?;
    }
    init_tracing(&config.log_filter);
    info!(month_key = ?config.month_key, "starting workload store");

    let service = WorkloadService::new(InMemoryWorkloadStore::new(config.month_key));

    match cli.command {
        Some(Commands::Replay { file }) => replay::run(&service, &file)?,
        Some(Commands::Consume) => consume::run(&service, io::stdin().lock(), io::stdout().lock())?,
        Some(Commands::Shell) | None => shell::run(&service)?,
    }
    Ok(())
}
