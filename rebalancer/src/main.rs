//! CLI entry point for the monthly distribution run.

use std::path::PathBuf;
use std::process;

use clap::Parser;

use equiweight::parse_cents;
use equiweight_rebalancer::config::Config;
use equiweight_rebalancer::error::{Error, Result};
use equiweight_rebalancer::run::{self, RunOptions};

#[derive(Parser)]
#[command(name = "distribute")]
#[command(about = "Equal-weight rebalancer: deploy cash across the ranked tickers")]
#[command(version)]
struct Cli {
    /// Cash to deploy, e.g. 1500 or 1500.50
    amount: String,

    /// Starting portfolio snapshot (default: last month's file)
    #[arg(long)]
    file: Option<PathBuf>,

    /// Path to config.toml (default: built-in settings)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Show the report without writing the new snapshot
    #[arg(long)]
    dry_run: bool,

    /// Overwrite this month's snapshot without asking
    #[arg(long)]
    force: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let cli = Cli::parse();

    if let Err(e) = execute(cli) {
        match &e {
            Error::Aborted(msg) => eprintln!("Aborted: {msg}"),
            _ => eprintln!("Error: {e}"),
        }
        process::exit(e.exit_code());
    }
}

fn execute(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let opts = RunOptions {
        cash: parse_cents(&cli.amount)?,
        file: cli.file,
        dry_run: cli.dry_run,
        force: cli.force,
        today: chrono::Local::now().date_naive(),
    };

    let client = run::connect_brapi(&config)?;
    run::run(&config, &client, &opts)?;
    Ok(())
}
