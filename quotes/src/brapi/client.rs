//! brapi.dev REST client.

use std::time::Duration;

use equiweight::{Price, PriceMap, Ticker};
use log::{debug, warn};
use reqwest::blocking::Client;

use super::types::{ErrorResponse, QuoteResponse};
use crate::PriceSource;
use crate::error::QuoteError;

pub const DEFAULT_BASE_URL: &str = "https://brapi.dev/api";

/// Blocking brapi.dev client.
pub struct BrapiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl BrapiClient {
    /// Create a client for `base_url` (e.g., [`DEFAULT_BASE_URL`]).
    pub fn new(base_url: &str, token: Option<&str>, timeout: Duration) -> Result<Self, QuoteError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| QuoteError::Connection(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(str::to_string),
        })
    }

    /// URL of the quote endpoint for `tickers`.
    pub fn quote_url(&self, tickers: &[Ticker]) -> String {
        let joined = tickers
            .iter()
            .map(Ticker::as_str)
            .collect::<Vec<_>>()
            .join(",");
        format!("{}/quote/{joined}", self.base_url)
    }
}

impl PriceSource for BrapiClient {
    fn prices(&self, tickers: &[Ticker]) -> Result<PriceMap, QuoteError> {
        if tickers.is_empty() {
            return Ok(PriceMap::new());
        }

        let url = self.quote_url(tickers);
        debug!("Requesting brapi quotes: {url}");

        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.query(&[("token", token)]);
        }

        let resp = request
            .send()
            .map_err(|e| QuoteError::Connection(format!("quote request failed: {e}")))?;

        let status = resp.status();
        let body = resp
            .text()
            .map_err(|e| QuoteError::Connection(format!("failed to read quote body: {e}")))?;

        if !status.is_success() {
            return Err(QuoteError::Http {
                status: status.as_u16(),
                body: error_message(&body),
            });
        }

        parse_quotes(&body)
    }
}

/// Parse a quote response body into a price map.
///
/// Symbols with no price, or a non-finite or non-positive one, are left out.
pub fn parse_quotes(body: &str) -> Result<PriceMap, QuoteError> {
    let parsed: QuoteResponse =
        serde_json::from_str(body).map_err(|e| QuoteError::Parse(e.to_string()))?;

    let mut prices = PriceMap::new();
    for result in parsed.results {
        match result.regular_market_price.and_then(Price::from_decimal) {
            Some(price) if price.is_positive() => {
                prices.insert(result.symbol, price);
            }
            _ => warn!("{} has no usable price in quote response", result.symbol),
        }
    }
    Ok(prices)
}

/// Best-effort extraction of the `message` field from an error body.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(err) if !err.message.is_empty() => err.message,
        _ => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_url_joins_tickers() {
        let client = BrapiClient::new("https://brapi.dev/api/", None, Duration::from_secs(5)).unwrap();
        let url = client.quote_url(&[Ticker::new("PETR4"), Ticker::new("VALE3")]);
        assert_eq!(url, "https://brapi.dev/api/quote/PETR4,VALE3");
    }

    #[test]
    fn error_message_prefers_json_message() {
        assert_eq!(
            error_message(r#"{"error":true,"message":"Ticker not found"}"#),
            "Ticker not found"
        );
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn empty_request_skips_network() {
        // Unroutable base URL: an actual request would fail
        let client = BrapiClient::new("http://127.0.0.1:1", None, Duration::from_millis(10)).unwrap();
        assert!(client.prices(&[]).unwrap().is_empty());
    }
}
