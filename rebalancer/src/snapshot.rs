//! Dated portfolio snapshots.
//!
//! Each run reads last month's holdings and writes this month's, one JSON
//! array of `{ticker, amount}` records per file, named after the month:
//! `2026-october.json`.

use std::fs;
use std::path::Path;

use chrono::{Datelike, Month, NaiveDate};
use equiweight::Portfolio;

use crate::error::{Error, Result};

/// Snapshot file name for the month containing `date`.
pub fn current_file_name(date: NaiveDate) -> String {
    file_name(date.year(), date.month())
}

/// Snapshot file name for the month before the one containing `date`.
pub fn previous_file_name(date: NaiveDate) -> String {
    if date.month() == 1 {
        file_name(date.year() - 1, 12)
    } else {
        file_name(date.year(), date.month() - 1)
    }
}

fn file_name(year: i32, month: u32) -> String {
    let name = u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map_or_else(|| format!("{month:02}"), |m| m.name().to_lowercase());
    format!("{year}-{name}.json")
}

/// Load a snapshot. Malformed files are an error, never a partial portfolio.
pub fn load_snapshot(path: &Path) -> Result<Portfolio> {
    let contents = fs::read_to_string(path).map_err(|e| Error::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&contents).map_err(|e| Error::Decode {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write a snapshot as indented JSON, creating the parent directory if needed.
pub fn save_snapshot(path: &Path, portfolio: &Portfolio) -> Result<()> {
    let write_err = |e| Error::Write {
        path: path.to_path_buf(),
        source: e,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let mut json = serde_json::to_string_pretty(portfolio).map_err(Error::Encode)?;
    json.push('\n');
    fs::write(path, json).map_err(write_err)
}
