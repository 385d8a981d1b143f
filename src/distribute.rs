//! Equal-weight distribution engine.
//!
//! Given current holdings, a priority-ordered ranking, new cash, and prices,
//! computes the target portfolio and the buy/sell operations that reach it.
//!
//! The pass is a strict sequential fold over the ranking: each ticker's trade
//! is clamped to the budget left by the tickers before it, so processing order
//! is part of the result.
//!
//! # Example
//!
//! ```
//! use equiweight::portfolio::{Portfolio, Position, PriceMap, Ranking};
//! use equiweight::{distribute, MissingPricePolicy, Operation, Price};
//!
//! let portfolio = Portfolio::new(vec![Position::new("AAA", 100)]).unwrap();
//! let ranking = Ranking::new(["AAA", "BBB"]).unwrap();
//! let prices = PriceMap::from_iter([("AAA", Price(10_00)), ("BBB", Price(20_00))]);
//!
//! let alloc = distribute(&portfolio, &ranking, 1_000_00, &prices, MissingPricePolicy::Fail).unwrap();
//!
//! assert_eq!(alloc.target, 1_000_00);
//! assert_eq!(alloc.operations, vec![Operation::buy("AAA", 0), Operation::buy("BBB", 50)]);
//! assert_eq!(alloc.balanced.amount(&"BBB".into()), 50);
//! ```

use std::fmt;

use rustc_hash::FxHashSet;

use crate::error::DistributeError;
use crate::portfolio::{Portfolio, Position, PriceMap, Ranking};
use crate::types::{Price, Quantity, Ticker};

/// Share counts above this are truncated to a multiple of it.
pub const ROUND_LOT: Quantity = 100;

/// Direction of an [`Operation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Side {
    Buy,
    Sell,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        })
    }
}

/// A buy or sell instruction for a whole number of shares.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Operation {
    pub side: Side,
    pub ticker: Ticker,
    pub quantity: Quantity,
}

impl Operation {
    pub fn buy(ticker: impl Into<Ticker>, quantity: Quantity) -> Self {
        Self {
            side: Side::Buy,
            ticker: ticker.into(),
            quantity,
        }
    }

    pub fn sell(ticker: impl Into<Ticker>, quantity: Quantity) -> Self {
        Self {
            side: Side::Sell,
            ticker: ticker.into(),
            quantity,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.side, self.ticker, self.quantity)
    }
}

/// What to do when a ranked or held ticker has no usable price.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MissingPricePolicy {
    /// Abort with [`DistributeError::MissingPrices`] before computing anything.
    #[default]
    Fail,
    /// Drop unpriced tickers from the universe and leave unpriced ranked
    /// holdings untouched.
    Skip,
}

/// Result of one distribution pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Allocation {
    /// Cash plus market value of priced holdings (cents).
    pub total_value: i64,
    /// Equal-weight value per priced ranked ticker (cents).
    pub target: i64,
    /// Budget left after the last processed ticker (cents).
    pub remaining: i64,
    /// Resulting holdings.
    pub balanced: Portfolio,
    /// Operations in ranking order, then liquidations in portfolio order.
    pub operations: Vec<Operation>,
    /// Ranked tickers never processed because the budget reached zero.
    pub unreached: Vec<Ticker>,
    /// Tickers left out for lack of a price (only under [`MissingPricePolicy::Skip`]).
    pub skipped: Vec<Ticker>,
}

impl Allocation {
    /// Sum of quantities bought and sold, by side.
    pub fn volume(&self, side: Side) -> Quantity {
        self.operations
            .iter()
            .filter(|op| op.side == side)
            .map(|op| op.quantity)
            .sum()
    }
}

/// Decision for a single ranked ticker.
#[derive(Debug, PartialEq, Eq)]
enum Step {
    Buy(Quantity),
    Sell(Quantity),
    Hold,
}

/// Distribute `cash` (cents) plus the value of `portfolio` evenly across `ranking`.
///
/// For each ranked ticker, in order, the distance to the equal-weight target is
/// clamped to the remaining budget, converted to whole shares, and truncated to
/// a multiple of [`ROUND_LOT`] when larger than one lot. Overweight tickers sell
/// only when at least one full lot is due; underweight (or exactly on target)
/// tickers always emit a buy, possibly of zero shares. Holdings outside the
/// ranking are sold in full.
pub fn distribute(
    portfolio: &Portfolio,
    ranking: &Ranking,
    cash: i64,
    prices: &PriceMap,
    policy: MissingPricePolicy,
) -> Result<Allocation, DistributeError> {
    if cash < 0 {
        return Err(DistributeError::NegativeCash(cash));
    }

    let ranked_missing = prices.missing(ranking);
    let held_missing = prices.missing(portfolio.tickers().filter(|t| !ranking.contains(t)));

    let skipped = match policy {
        MissingPricePolicy::Fail => {
            let tickers: Vec<Ticker> = ranked_missing.into_iter().chain(held_missing).collect();
            if !tickers.is_empty() {
                return Err(DistributeError::MissingPrices { tickers });
            }
            Vec::new()
        }
        MissingPricePolicy::Skip => ranked_missing.into_iter().chain(held_missing).collect(),
    };

    // Priced ranked tickers, still in priority order
    let active: Vec<(&Ticker, Price)> = ranking
        .iter()
        .filter_map(|t| prices.usable(t).map(|p| (t, p)))
        .collect();
    if active.is_empty() {
        return Err(DistributeError::NoPricedTickers);
    }

    let total_value = portfolio
        .value(prices)
        .and_then(|held| held.checked_add(cash))
        .ok_or(DistributeError::Overflow("total value"))?;
    let target = total_value / active.len() as i64;

    let mut remaining = total_value;
    let mut visited: FxHashSet<&Ticker> = FxHashSet::default();
    let mut balanced = Portfolio::empty();
    let mut operations = Vec::new();
    let mut unreached = Vec::new();

    for (i, &(ticker, price)) in active.iter().enumerate() {
        if remaining == 0 {
            unreached.extend(active[i..].iter().map(|(t, _)| (*t).clone()));
            break;
        }
        visited.insert(ticker);

        let current_amount = portfolio.amount(ticker);
        let current_value = price
            .value_of(current_amount)
            .ok_or(DistributeError::Overflow("position value"))?;

        let (step, trade_value) = plan_step(current_value, target, remaining, price)?;
        let new_amount = match step {
            Step::Sell(shares) => {
                operations.push(Operation::sell(ticker.clone(), shares));
                remaining = remaining
                    .checked_add(trade_value)
                    .ok_or(DistributeError::Overflow("remaining budget"))?;
                current_amount
                    .checked_sub(shares)
                    .ok_or(DistributeError::Overflow("share count"))?
            }
            Step::Buy(shares) => {
                operations.push(Operation::buy(ticker.clone(), shares));
                remaining -= trade_value;
                current_amount
                    .checked_add(shares)
                    .ok_or(DistributeError::Overflow("share count"))?
            }
            Step::Hold => current_amount,
        };
        balanced.push(Position::new(ticker.clone(), new_amount));
    }

    // Ranked holdings that were never traded stay as they are
    for ticker in ranking {
        if visited.contains(ticker) {
            continue;
        }
        if let Some(pos) = portfolio.position(ticker) {
            balanced.push(pos.clone());
        }
    }

    for pos in portfolio.positions() {
        if !ranking.contains(&pos.ticker) {
            operations.push(Operation::sell(pos.ticker.clone(), pos.amount));
        }
    }

    Ok(Allocation {
        total_value,
        target,
        remaining,
        balanced,
        operations,
        unreached,
        skipped,
    })
}

/// Decide the trade for one ticker and its value in cents.
///
/// `price` must be positive. `target`, `current_value` and `remaining` are
/// non-negative.
fn plan_step(
    current_value: i64,
    target: i64,
    remaining: i64,
    price: Price,
) -> Result<(Step, i64), DistributeError> {
    let desired = target.abs_diff(current_value).min(remaining.unsigned_abs());
    let shares = round_lot(desired / price.0.unsigned_abs());
    let trade_value = price
        .value_of(shares)
        .ok_or(DistributeError::Overflow("trade value"))?;

    Ok(if current_value >= target && shares >= ROUND_LOT {
        (Step::Sell(shares), trade_value)
    } else if target >= current_value {
        (Step::Buy(shares), trade_value)
    } else {
        (Step::Hold, 0)
    })
}

/// Truncate share counts above one lot to a whole number of lots.
#[inline]
pub fn round_lot(shares: Quantity) -> Quantity {
    if shares > ROUND_LOT {
        shares - shares % ROUND_LOT
    } else {
        shares
    }
}
