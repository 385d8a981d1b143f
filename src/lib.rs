// Allow our dollar.cents digit grouping convention (e.g., 100_00 = $100.00)
#![allow(clippy::inconsistent_digit_grouping)]

//! # equiweight
//!
//! Deterministic equal-weight portfolio distribution.
//!
//! Given current holdings, a priority-ordered ranking of tickers, an amount of
//! new cash, and a price per ticker, [`distribute`] computes the target
//! portfolio and the ordered buy/sell operations that reach it.
//!
//! ## Features
//!
//! - **Equal weight**: every priced ranked ticker targets `total / n`
//! - **Priority budget**: tickers are funded in ranking order from one running budget
//! - **Lot rounding**: share counts above 100 are truncated to whole lots of 100
//! - **Divestment**: holdings outside the ranking are sold in full
//! - **Fixed-point money**: all values are integer cents, so floors are exact
//!
//! ## Quick Start
//!
//! ```
//! use equiweight::portfolio::{Portfolio, Position, PriceMap, Ranking};
//! use equiweight::{distribute, MissingPricePolicy, Operation, Price};
//!
//! let portfolio = Portfolio::new(vec![
//!     Position::new("AAA", 100),
//!     Position::new("ZZZ", 30),
//! ]).unwrap();
//! let ranking = Ranking::new(["AAA", "BBB"]).unwrap();
//! let prices = PriceMap::from_iter([
//!     ("AAA", Price(10_00)),
//!     ("BBB", Price(20_00)),
//!     ("ZZZ", Price(5_00)),
//! ]);
//!
//! let alloc = distribute(&portfolio, &ranking, 850_00, &prices, MissingPricePolicy::Fail).unwrap();
//!
//! // $850 cash + $1000 AAA + $150 ZZZ = $2000, split over two tickers
//! assert_eq!(alloc.target, 1_000_00);
//! assert_eq!(alloc.operations, vec![
//!     Operation::buy("AAA", 0),
//!     Operation::buy("BBB", 50),
//!     Operation::sell("ZZZ", 30),
//! ]);
//! ```
//!
//! ## Missing prices
//!
//! A ticker without a positive quote cannot be divided into shares. The
//! caller picks the behavior with [`MissingPricePolicy`]:
//!
//! | Policy | Behavior |
//! |--------|----------|
//! | **Fail** | Return [`DistributeError::MissingPrices`] listing every unpriced ticker |
//! | **Skip** | Leave unpriced tickers out of the universe and report them in [`Allocation::skipped`] |

pub mod distribute;
mod error;
pub mod portfolio;
mod types;

// Re-export public API
pub use distribute::{Allocation, MissingPricePolicy, Operation, ROUND_LOT, Side, distribute};
pub use error::{DistributeError, ModelError, ParseCashError};
pub use portfolio::{Portfolio, Position, PriceMap, Ranking};
pub use types::{Price, Quantity, Ticker, format_cents, parse_cents};
