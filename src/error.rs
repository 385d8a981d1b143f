//! Errors for model validation, cash parsing, and distribution.

use crate::types::Ticker;

/// Structural problems with a portfolio or ranking.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("ranking is empty")]
    EmptyRanking,

    #[error("empty ticker")]
    EmptyTicker,

    #[error("duplicate ticker: {0}")]
    DuplicateTicker(Ticker),
}

/// Rejected cash amount strings.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseCashError {
    #[error("amount is empty")]
    Empty,

    #[error("amount must not be negative: {0}")]
    Negative(String),

    #[error("amount has more than two decimal places: {0}")]
    TooPrecise(String),

    #[error("invalid amount: {0}")]
    Invalid(String),
}

/// Errors returned by [`distribute`](crate::distribute()).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DistributeError {
    #[error("cash must be non-negative, got {0} cents")]
    NegativeCash(i64),

    #[error("no price available for: {}", join(.tickers))]
    MissingPrices { tickers: Vec<Ticker> },

    #[error("no ranked ticker has a price")]
    NoPricedTickers,

    #[error("amounts too large: {0} overflows i64 cents")]
    Overflow(&'static str),
}

fn join(tickers: &[Ticker]) -> String {
    tickers
        .iter()
        .map(Ticker::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(format!("{}", ModelError::EmptyRanking), "ranking is empty");
        assert_eq!(
            format!("{}", ModelError::DuplicateTicker(Ticker::new("AAA"))),
            "duplicate ticker: AAA"
        );
    }

    #[test]
    fn missing_prices_lists_tickers() {
        let err = DistributeError::MissingPrices {
            tickers: vec![Ticker::new("AAA"), Ticker::new("BBB")],
        };
        assert_eq!(err.to_string(), "no price available for: AAA, BBB");
    }

    #[test]
    fn overflow_names_the_quantity() {
        assert_eq!(
            DistributeError::Overflow("total value").to_string(),
            "amounts too large: total value overflows i64 cents"
        );
    }

    #[test]
    fn is_error() {
        let err: Box<dyn std::error::Error> = Box::new(DistributeError::NoPricedTickers);
        assert!(err.to_string().contains("price"));
    }
}
