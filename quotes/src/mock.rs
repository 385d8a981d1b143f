//! Mock price source for testing: serves fixed quotes without network calls.
//!
//! ```
//! use equiweight::{Price, Ticker};
//! use equiweight_quotes::PriceSource;
//! use equiweight_quotes::mock::MockPriceSource;
//!
//! let source = MockPriceSource::builder()
//!     .with_quote("AAA", Price(10_00))
//!     .build();
//!
//! let prices = source.prices(&[Ticker::new("AAA"), Ticker::new("ZZZ")]).unwrap();
//! assert_eq!(prices.len(), 1); // ZZZ is unknown and omitted
//! ```

use std::sync::Mutex;

use equiweight::{Price, PriceMap, Ticker};

use crate::PriceSource;
use crate::error::QuoteError;

/// Builder for `MockPriceSource`.
#[derive(Default)]
pub struct MockPriceSourceBuilder {
    quotes: Vec<(Ticker, Price)>,
    failure: Option<String>,
}

impl MockPriceSourceBuilder {
    pub fn with_quote(mut self, ticker: impl Into<Ticker>, price: Price) -> Self {
        self.quotes.push((ticker.into(), price));
        self
    }

    /// Make every request fail with a connection error.
    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    pub fn build(self) -> MockPriceSource {
        MockPriceSource {
            quotes: self.quotes,
            failure: self.failure,
            requests: Mutex::new(Vec::new()),
        }
    }
}

/// A price source that answers from a fixed table and records every request.
pub struct MockPriceSource {
    quotes: Vec<(Ticker, Price)>,
    failure: Option<String>,
    requests: Mutex<Vec<Vec<Ticker>>>,
}

impl MockPriceSource {
    pub fn builder() -> MockPriceSourceBuilder {
        MockPriceSourceBuilder::default()
    }

    /// Ticker lists passed to `prices`, in call order (for assertion in tests).
    pub fn requests(&self) -> Vec<Vec<Ticker>> {
        match self.requests.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl PriceSource for MockPriceSource {
    fn prices(&self, tickers: &[Ticker]) -> Result<PriceMap, QuoteError> {
        match self.requests.lock() {
            Ok(mut guard) => guard.push(tickers.to_vec()),
            Err(poisoned) => poisoned.into_inner().push(tickers.to_vec()),
        }

        if let Some(msg) = &self.failure {
            return Err(QuoteError::Connection(msg.clone()));
        }

        Ok(self
            .quotes
            .iter()
            .filter(|(t, _)| tickers.contains(t))
            .map(|(t, p)| (t.clone(), *p))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> Ticker {
        Ticker::new(s)
    }

    #[test]
    fn serves_only_requested_and_known() {
        let source = MockPriceSource::builder()
            .with_quote("AAA", Price(10_00))
            .with_quote("BBB", Price(20_00))
            .build();

        let prices = source.prices(&[t("AAA"), t("ZZZ")]).unwrap();
        assert_eq!(prices.len(), 1);
        assert_eq!(prices.get(&t("AAA")), Some(Price(10_00)));
        assert_eq!(prices.get(&t("BBB")), None);
        assert_eq!(prices.get(&t("ZZZ")), None);
    }

    #[test]
    fn records_requests() {
        let source = MockPriceSource::builder().build();
        source.prices(&[t("AAA")]).unwrap();
        source.prices(&[t("BBB"), t("CCC")]).unwrap();
        assert_eq!(
            source.requests(),
            vec![vec![t("AAA")], vec![t("BBB"), t("CCC")]]
        );
    }

    #[test]
    fn failing_source_errors() {
        let source = MockPriceSource::builder()
            .with_quote("AAA", Price(10_00))
            .failing("service down")
            .build();
        let err = source.prices(&[t("AAA")]).unwrap_err();
        assert!(matches!(err, QuoteError::Connection(ref m) if m == "service down"));
        // The failed request is still recorded
        assert_eq!(source.requests().len(), 1);
    }

    #[test]
    fn boxed_source_delegates() {
        let source: Box<dyn PriceSource> = Box::new(
            MockPriceSource::builder()
                .with_quote("AAA", Price(10_00))
                .build(),
        );
        assert_eq!(source.prices(&[t("AAA")]).unwrap().len(), 1);
    }
}
