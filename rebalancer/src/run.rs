//! Run orchestrator: snapshot → quotes → distribute → report → snapshot.
//!
//! Every blocking call (file reads, the quote request) happens before the
//! single engine invocation; the report and the next snapshot come after it.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use equiweight::portfolio::universe;
use equiweight::{Allocation, Portfolio, PriceMap, Ticker, distribute, format_cents};
use equiweight_quotes::PriceSource;
use equiweight_quotes::brapi::BrapiClient;
use log::{info, warn};

use crate::audit::{self, AuditLog};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::ranking::load_ranking;
use crate::report;
use crate::snapshot;

/// Options for a single run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Fresh cash to deploy, in cents.
    pub cash: i64,
    /// Starting snapshot; defaults to last month's file.
    pub file: Option<PathBuf>,
    /// Print the report without writing the next snapshot.
    pub dry_run: bool,
    /// Overwrite an existing snapshot without asking.
    pub force: bool,
    /// Date the run is dated to.
    pub today: NaiveDate,
}

/// What a run computed, and where the result went.
#[derive(Debug)]
pub struct Outcome {
    pub original: Portfolio,
    pub prices: PriceMap,
    pub allocation: Allocation,
    /// Path of the written snapshot, if one was written.
    pub saved_to: Option<PathBuf>,
}

/// Build the brapi.dev client from the `[quotes]` section.
pub fn connect_brapi(config: &Config) -> Result<BrapiClient> {
    Ok(BrapiClient::new(
        &config.quotes.base_url,
        config.quotes.token.as_deref(),
        config.timeout(),
    )?)
}

/// Snapshot the run starts from: `--file` if given, else last month's file.
pub fn starting_snapshot(config: &Config, opts: &RunOptions) -> PathBuf {
    match &opts.file {
        Some(path) => path.clone(),
        None => config.snapshot_path(&snapshot::previous_file_name(opts.today)),
    }
}

/// Fetch quotes for `tickers`, warning once per ticker the source left out.
///
/// Returns the quotes and the unpriced tickers in request order.
pub fn fetch_prices(source: &dyn PriceSource, tickers: &[Ticker]) -> Result<(PriceMap, Vec<Ticker>)> {
    info!("Fetching quotes for {} tickers", tickers.len());
    let prices = source.prices(tickers)?;
    let missing = prices.missing(tickers);
    for ticker in &missing {
        warn!("No price for {ticker}");
    }
    Ok((prices, missing))
}

/// Execute a full run.
pub fn run(config: &Config, source: &dyn PriceSource, opts: &RunOptions) -> Result<Outcome> {
    // 1. Inputs
    let ranking_path = config.ranking_path();
    let ranking = load_ranking(&ranking_path)?;
    info!("Loaded ranking of {} tickers from {}", ranking.len(), ranking_path.display());

    let snapshot_path = starting_snapshot(config, opts);
    let original = snapshot::load_snapshot(&snapshot_path)?;
    info!(
        "Loaded {} positions from {}",
        original.len(),
        snapshot_path.display()
    );

    let mut audit = AuditLog::open(&config.audit_path())?;
    audit::log_run_started(&mut audit, &snapshot_path.display().to_string(), opts.cash)?;

    // 2. Quotes for everything ranked or held
    let tickers = universe(&original, &ranking);
    let (prices, missing) = fetch_prices(source, &tickers)?;
    audit::log_prices(&mut audit, &prices, &missing)?;

    // 3. Distribute
    let allocation = distribute(
        &original,
        &ranking,
        opts.cash,
        &prices,
        config.policy.missing_price.into(),
    )?;
    audit::log_allocation(&mut audit, &allocation)?;

    if !allocation.unreached.is_empty() {
        warn!(
            "Budget exhausted before {} ranked tickers; held ones are carried unchanged",
            allocation.unreached.len()
        );
    }
    for ticker in &allocation.skipped {
        warn!("Skipped {ticker}: no usable price");
    }
    info!(
        "Total {} → {} per ticker, {} left over",
        format_cents(allocation.total_value),
        format_cents(allocation.target),
        format_cents(allocation.remaining)
    );

    // 4. Report
    println!("{}", report::render(&original, &allocation, &prices, opts.cash));

    // 5. Next snapshot
    let saved_to = if opts.dry_run {
        println!("Dry run: snapshot not written.");
        None
    } else {
        let path = config.snapshot_path(&snapshot::current_file_name(opts.today));
        if confirm_overwrite(&path, opts.force)? {
            snapshot::save_snapshot(&path, &allocation.balanced)?;
            info!("Saved {}", path.display());
            audit::log_snapshot_saved(
                &mut audit,
                &path.display().to_string(),
                allocation.balanced.len(),
            )?;
            Some(path)
        } else {
            audit.log(
                "overwrite_declined",
                serde_json::json!({ "snapshot_file": path.display().to_string() }),
            )?;
            audit::log_run_completed(&mut audit, allocation.operations.len(), false)?;
            return Err(Error::Aborted(format!("{} left unchanged", path.display())));
        }
    };

    audit::log_run_completed(&mut audit, allocation.operations.len(), saved_to.is_some())?;

    Ok(Outcome {
        original,
        prices,
        allocation,
        saved_to,
    })
}

/// Ask before replacing a snapshot that already exists.
fn confirm_overwrite(path: &Path, force: bool) -> Result<bool> {
    if force || !path.exists() {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(format!("{} already exists. Overwrite?", path.display()))
        .default(false)
        .interact()
        .map_err(Error::Prompt)
}
