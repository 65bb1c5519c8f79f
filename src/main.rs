//! Backup runner - main entry point.
//!
//! Loads the task list from a TOML file and executes every task in order:
//! archive the source tree, then prune aged-out backups.

use anyhow::Result;
use backup_runner::{config::Config, runner, utils};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "backup.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    utils::logger::init(args.log_level.as_deref().unwrap_or("info"))?;

    tracing::info!("Starting backup-runner v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_file(&args.config)?;
    runner::run_all(&config.tasks);

    Ok(())
}
