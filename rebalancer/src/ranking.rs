//! Ranking file (ranking.json) loading.
//!
//! The file is a plain JSON array of tickers in priority order:
//!
//! ```json
//! ["PETR4", "VALE3", "ITUB4"]
//! ```

use std::path::Path;

use equiweight::Ranking;

use crate::error::{Error, Result};

/// Load and validate a ranking file.
pub fn load_ranking(path: &Path) -> Result<Ranking> {
    let contents = std::fs::read_to_string(path).map_err(|e| Error::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&contents).map_err(|e| Error::Decode {
        path: path.to_path_buf(),
        source: e,
    })
}
