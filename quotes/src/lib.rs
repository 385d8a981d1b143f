//! Price sources for equiweight.
//!
//! Provides a `PriceSource` trait that abstracts over market-data services.
//! Implementations:
//!
//! - **brapi** (feature `brapi`): brapi.dev quote REST API
//! - **mock**: fixed quotes for tests and offline runs

pub mod error;
pub mod mock;

#[cfg(feature = "brapi")]
pub mod brapi;

pub use error::QuoteError;

use equiweight::{PriceMap, Ticker};

/// A market-data service that quotes the latest price per ticker.
pub trait PriceSource {
    /// Fetch the latest price for each of `tickers`.
    ///
    /// Tickers the source cannot resolve are omitted from the result rather
    /// than reported as errors. Errors mean the request itself failed.
    fn prices(&self, tickers: &[Ticker]) -> Result<PriceMap, QuoteError>;
}

impl<P: PriceSource + ?Sized> PriceSource for Box<P> {
    fn prices(&self, tickers: &[Ticker]) -> Result<PriceMap, QuoteError> {
        (**self).prices(tickers)
    }
}
