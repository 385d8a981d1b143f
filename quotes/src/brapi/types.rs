//! brapi.dev API response types.

use serde::Deserialize;

/// Response of the quote endpoint.
#[derive(Debug, Deserialize)]
pub struct QuoteResponse {
    #[serde(default)]
    pub results: Vec<QuoteResult>,
}

/// One quoted symbol. Fields the engine does not need are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResult {
    pub symbol: String,
    #[serde(default)]
    pub regular_market_price: Option<f64>,
}

/// Error body returned with non-2xx statuses.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub message: String,
}
