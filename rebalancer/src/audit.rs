//! JSONL audit trail logging.
//!
//! Each run appends events to an audit.jsonl file, one JSON object per line.

use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use equiweight::{Allocation, PriceMap, Ticker};
use serde::Serialize;

use crate::error::Result;

/// An audit event written to the JSONL trail.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    pub event: &'static str,
    pub ts: DateTime<Utc>,
    #[serde(flatten)]
    pub data: serde_json::Value,
}

/// Append-only audit logger.
pub struct AuditLog {
    writer: BufWriter<std::fs::File>,
}

impl AuditLog {
    /// Open (or create) the audit log file for appending.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    /// Log an event with arbitrary JSON data.
    pub fn log(&mut self, event: &'static str, data: serde_json::Value) -> Result<()> {
        let entry = AuditEvent {
            event,
            ts: Utc::now(),
            data,
        };
        let json = serde_json::to_string(&entry)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        writeln!(self.writer, "{json}")?;
        self.writer.flush()?;
        Ok(())
    }

    /// Log a simple event with no additional data.
    pub fn log_simple(&mut self, event: &'static str) -> Result<()> {
        self.log(event, serde_json::json!({}))
    }
}

fn dollars(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// Convenience: log a run start event.
pub fn log_run_started(audit: &mut AuditLog, snapshot_file: &str, cash_cents: i64) -> Result<()> {
    audit.log(
        "run_started",
        serde_json::json!({
            "snapshot_file": snapshot_file,
            "cash": dollars(cash_cents),
        }),
    )
}

/// Convenience: log quotes received, plus the tickers the source did not price.
pub fn log_prices(audit: &mut AuditLog, prices: &PriceMap, missing: &[Ticker]) -> Result<()> {
    let mut quoted: Vec<_> = prices.iter().collect();
    quoted.sort_by(|a, b| a.0.cmp(b.0));
    let price_data: Vec<_> = quoted
        .into_iter()
        .map(|(ticker, price)| {
            serde_json::json!({
                "ticker": ticker.as_str(),
                "price": dollars(price.0),
            })
        })
        .collect();
    let missing: Vec<&str> = missing.iter().map(Ticker::as_str).collect();

    audit.log(
        "prices_fetched",
        serde_json::json!({
            "prices": price_data,
            "missing": missing,
        }),
    )
}

/// Convenience: log the computed allocation.
pub fn log_allocation(audit: &mut AuditLog, alloc: &Allocation) -> Result<()> {
    let op_data: Vec<_> = alloc
        .operations
        .iter()
        .map(|op| {
            serde_json::json!({
                "side": op.side.to_string(),
                "ticker": op.ticker.as_str(),
                "quantity": op.quantity,
            })
        })
        .collect();
    let unreached: Vec<&str> = alloc.unreached.iter().map(Ticker::as_str).collect();
    let skipped: Vec<&str> = alloc.skipped.iter().map(Ticker::as_str).collect();

    audit.log(
        "allocation_computed",
        serde_json::json!({
            "total_value": dollars(alloc.total_value),
            "target": dollars(alloc.target),
            "remaining": dollars(alloc.remaining),
            "operations": op_data,
            "unreached": unreached,
            "skipped": skipped,
        }),
    )
}

/// Convenience: log a written snapshot.
pub fn log_snapshot_saved(audit: &mut AuditLog, snapshot_file: &str, positions: usize) -> Result<()> {
    audit.log(
        "snapshot_saved",
        serde_json::json!({
            "snapshot_file": snapshot_file,
            "positions": positions,
        }),
    )
}

/// Convenience: log run completion.
pub fn log_run_completed(audit: &mut AuditLog, operations: usize, saved: bool) -> Result<()> {
    audit.log(
        "run_completed",
        serde_json::json!({
            "operations": operations,
            "saved": saved,
        }),
    )
}
