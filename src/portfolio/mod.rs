//! Portfolio model: holdings, the ranked ticker universe, and quoted prices.
//!
//! These are plain validated containers. The engine in [`crate::distribute`]
//! reads them and never mutates them.
//!
//! # Example
//!
//! ```
//! use equiweight::portfolio::{Portfolio, Position, PriceMap, Ranking};
//! use equiweight::Price;
//!
//! let portfolio = Portfolio::new(vec![Position::new("AAA", 100)]).unwrap();
//! let ranking = Ranking::new(["AAA", "BBB"]).unwrap();
//! let prices = PriceMap::from_iter([("AAA", Price(10_00)), ("BBB", Price(20_00))]);
//!
//! assert_eq!(portfolio.value(&prices), Some(1_000_00));
//! assert_eq!(ranking.len(), 2);
//! ```

pub mod position;

pub use position::Position;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::ModelError;
use crate::types::{Price, Quantity, Ticker};

/// An ordered set of positions, at most one per ticker.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<Position>", into = "Vec<Position>"))]
pub struct Portfolio {
    positions: Vec<Position>,
}

impl Portfolio {
    /// Build a portfolio, rejecting empty or repeated tickers.
    pub fn new(positions: Vec<Position>) -> Result<Self, ModelError> {
        let mut seen = FxHashSet::default();
        for p in &positions {
            if p.ticker.as_str().is_empty() {
                return Err(ModelError::EmptyTicker);
            }
            if !seen.insert(&p.ticker) {
                return Err(ModelError::DuplicateTicker(p.ticker.clone()));
            }
        }
        Ok(Self { positions })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Held quantity of `ticker` (0 when not held).
    pub fn amount(&self, ticker: &Ticker) -> Quantity {
        self.position(ticker).map_or(0, |p| p.amount)
    }

    pub fn position(&self, ticker: &Ticker) -> Option<&Position> {
        self.positions.iter().find(|p| &p.ticker == ticker)
    }

    pub fn contains(&self, ticker: &Ticker) -> bool {
        self.position(ticker).is_some()
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn tickers(&self) -> impl Iterator<Item = &Ticker> {
        self.positions.iter().map(|p| &p.ticker)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Market value of all holdings (cents).
    ///
    /// Tickers without a usable (positive) price contribute nothing. `None`
    /// when the total does not fit in `i64` cents.
    pub fn value(&self, prices: &PriceMap) -> Option<i64> {
        self.positions.iter().try_fold(0i64, |acc, p| {
            let value = match prices.usable(&p.ticker) {
                Some(price) => p.market_value(price)?,
                None => 0,
            };
            acc.checked_add(value)
        })
    }

    /// Append a position. Callers inside the crate guarantee the ticker is new.
    pub(crate) fn push(&mut self, position: Position) {
        debug_assert!(
            !self.contains(&position.ticker),
            "duplicate ticker {} pushed into portfolio",
            position.ticker
        );
        self.positions.push(position);
    }
}

impl TryFrom<Vec<Position>> for Portfolio {
    type Error = ModelError;

    fn try_from(positions: Vec<Position>) -> Result<Self, Self::Error> {
        Portfolio::new(positions)
    }
}

impl From<Portfolio> for Vec<Position> {
    fn from(portfolio: Portfolio) -> Self {
        portfolio.positions
    }
}

/// Priority-ordered universe of tickers eligible for allocation.
///
/// Earlier entries are funded first. Never empty, never repeats a ticker.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<Ticker>", into = "Vec<Ticker>"))]
pub struct Ranking {
    tickers: Vec<Ticker>,
}

impl Ranking {
    pub fn new<I, T>(tickers: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = T>,
        T: Into<Ticker>,
    {
        let tickers: Vec<Ticker> = tickers.into_iter().map(Into::into).collect();
        if tickers.is_empty() {
            return Err(ModelError::EmptyRanking);
        }
        let mut seen = FxHashSet::default();
        for t in &tickers {
            if t.as_str().is_empty() {
                return Err(ModelError::EmptyTicker);
            }
            if !seen.insert(t) {
                return Err(ModelError::DuplicateTicker(t.clone()));
            }
        }
        Ok(Self { tickers })
    }

    pub fn tickers(&self) -> &[Ticker] {
        &self.tickers
    }

    pub fn contains(&self, ticker: &Ticker) -> bool {
        self.tickers.contains(ticker)
    }

    pub fn len(&self) -> usize {
        self.tickers.len()
    }

    /// Always false; kept for API symmetry with [`Portfolio::is_empty`].
    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Ticker> {
        self.tickers.iter()
    }
}

impl TryFrom<Vec<Ticker>> for Ranking {
    type Error = ModelError;

    fn try_from(tickers: Vec<Ticker>) -> Result<Self, Self::Error> {
        Ranking::new(tickers)
    }
}

impl From<Ranking> for Vec<Ticker> {
    fn from(ranking: Ranking) -> Self {
        ranking.tickers
    }
}

impl<'a> IntoIterator for &'a Ranking {
    type Item = &'a Ticker;
    type IntoIter = std::slice::Iter<'a, Ticker>;

    fn into_iter(self) -> Self::IntoIter {
        self.tickers.iter()
    }
}

/// Latest quoted price per ticker.
///
/// Lookups return `None` for tickers the price source could not resolve;
/// there is no implicit zero default.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PriceMap {
    prices: FxHashMap<Ticker, Price>,
}

impl PriceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, ticker: impl Into<Ticker>, price: Price) -> Option<Price> {
        self.prices.insert(ticker.into(), price)
    }

    /// Price of `ticker`, if quoted.
    pub fn get(&self, ticker: &Ticker) -> Option<Price> {
        self.prices.get(ticker).copied()
    }

    /// Price of `ticker`, only if quoted and strictly positive.
    pub fn usable(&self, ticker: &Ticker) -> Option<Price> {
        self.get(ticker).filter(|p| p.is_positive())
    }

    /// Tickers from `tickers` with no usable price, in input order.
    pub fn missing<'a, I>(&self, tickers: I) -> Vec<Ticker>
    where
        I: IntoIterator<Item = &'a Ticker>,
    {
        tickers
            .into_iter()
            .filter(|t| self.usable(t).is_none())
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Ticker, &Price)> {
        self.prices.iter()
    }
}

impl<T: Into<Ticker>> FromIterator<(T, Price)> for PriceMap {
    fn from_iter<I: IntoIterator<Item = (T, Price)>>(iter: I) -> Self {
        Self {
            prices: iter.into_iter().map(|(t, p)| (t.into(), p)).collect(),
        }
    }
}

/// Every ticker that needs a quote: ranked tickers first, then held tickers
/// outside the ranking, each listed once.
pub fn universe(portfolio: &Portfolio, ranking: &Ranking) -> Vec<Ticker> {
    let mut tickers: Vec<Ticker> = ranking.tickers().to_vec();
    for t in portfolio.tickers() {
        if !ranking.contains(t) {
            tickers.push(t.clone());
        }
    }
    tickers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> Ticker {
        Ticker::new(s)
    }

    #[test]
    fn portfolio_rejects_duplicates() {
        let result = Portfolio::new(vec![Position::new("AAA", 1), Position::new("AAA", 2)]);
        assert_eq!(result, Err(ModelError::DuplicateTicker(t("AAA"))));
    }

    #[test]
    fn portfolio_rejects_empty_ticker() {
        let result = Portfolio::new(vec![Position::new("", 1)]);
        assert_eq!(result, Err(ModelError::EmptyTicker));
    }

    #[test]
    fn amount_defaults_to_zero() {
        let p = Portfolio::new(vec![Position::new("AAA", 100)]).unwrap();
        assert_eq!(p.amount(&t("AAA")), 100);
        assert_eq!(p.amount(&t("BBB")), 0);
    }

    #[test]
    fn value_skips_unpriced() {
        let p = Portfolio::new(vec![Position::new("AAA", 100), Position::new("ZZZ", 5)]).unwrap();
        let prices = PriceMap::from_iter([("AAA", Price(10_00))]);
        assert_eq!(p.value(&prices), Some(1_000_00));
    }

    #[test]
    fn value_ignores_non_positive_quotes() {
        let p = Portfolio::new(vec![
            Position::new("AAA", 100),
            Position::new("NEG", 10),
            Position::new("NIL", 10),
        ])
        .unwrap();
        let prices = PriceMap::from_iter([
            ("AAA", Price(10_00)),
            ("NEG", Price(-100_00)),
            ("NIL", Price::ZERO),
        ]);
        assert_eq!(p.value(&prices), Some(1_000_00));
    }

    #[test]
    fn value_overflow_is_none() {
        let p = Portfolio::new(vec![
            Position::new("AAA", 1 << 62),
            Position::new("BBB", 1 << 62),
        ])
        .unwrap();
        let prices = PriceMap::from_iter([("AAA", Price(1)), ("BBB", Price(1))]);
        assert_eq!(p.value(&prices), None);
    }

    #[test]
    fn ranking_rejects_empty_and_duplicates() {
        assert_eq!(
            Ranking::new(Vec::<Ticker>::new()),
            Err(ModelError::EmptyRanking)
        );
        assert_eq!(
            Ranking::new(["AAA", "BBB", "AAA"]),
            Err(ModelError::DuplicateTicker(t("AAA")))
        );
        assert_eq!(Ranking::new(["AAA", ""]), Err(ModelError::EmptyTicker));
    }

    #[test]
    fn ranking_preserves_order() {
        let r = Ranking::new(["CCC", "AAA", "BBB"]).unwrap();
        let order: Vec<&str> = r.iter().map(Ticker::as_str).collect();
        assert_eq!(order, ["CCC", "AAA", "BBB"]);
        assert!(r.contains(&t("AAA")));
        assert!(!r.contains(&t("ZZZ")));
    }

    #[test]
    fn missing_excludes_zero_and_absent() {
        let prices = PriceMap::from_iter([("AAA", Price(10_00)), ("BBB", Price::ZERO)]);
        let wanted = [t("AAA"), t("BBB"), t("CCC")];
        assert_eq!(prices.missing(&wanted), vec![t("BBB"), t("CCC")]);
        assert_eq!(prices.get(&t("BBB")), Some(Price::ZERO));
        assert_eq!(prices.usable(&t("BBB")), None);
    }

    #[test]
    fn universe_is_ranking_then_unranked_holdings() {
        let p = Portfolio::new(vec![
            Position::new("ZZZ", 1),
            Position::new("AAA", 1),
            Position::new("YYY", 1),
        ])
        .unwrap();
        let r = Ranking::new(["AAA", "BBB"]).unwrap();
        assert_eq!(universe(&p, &r), vec![t("AAA"), t("BBB"), t("ZZZ"), t("YYY")]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn portfolio_json_rejects_duplicates() {
        let json = r#"[{"ticker":"AAA","amount":1},{"ticker":"AAA","amount":2}]"#;
        assert!(serde_json::from_str::<Portfolio>(json).is_err());

        let json = r#"[{"ticket":"AAA","amount":1},{"ticker":"BBB","amount":2}]"#;
        let p: Portfolio = serde_json::from_str(json).unwrap();
        assert_eq!(p.len(), 2);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn ranking_json_is_plain_array() {
        let r: Ranking = serde_json::from_str(r#"["AAA","BBB"]"#).unwrap();
        assert_eq!(r.len(), 2);
        assert!(serde_json::from_str::<Ranking>("[]").is_err());
    }
}
