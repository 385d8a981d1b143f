//! A holding in a single ticker.

use crate::types::{Price, Quantity, Ticker};

/// A current or target holding: ticker plus whole-share quantity.
///
/// Snapshots written by older tooling used the key `ticket`; it is still
/// accepted on input.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    #[cfg_attr(feature = "serde", serde(alias = "ticket"))]
    pub ticker: Ticker,
    pub amount: Quantity,
}

impl Position {
    pub fn new(ticker: impl Into<Ticker>, amount: Quantity) -> Self {
        Self {
            ticker: ticker.into(),
            amount,
        }
    }

    /// Market value at the given price (cents), or `None` on overflow.
    #[inline]
    pub fn market_value(&self, price: Price) -> Option<i64> {
        price.value_of(self.amount)
    }

    #[inline]
    pub fn is_flat(&self) -> bool {
        self.amount == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn market_value() {
        let pos = Position::new("AAA", 100);
        assert_eq!(pos.market_value(Price(10_00)), Some(1_000_00));
        assert!(!pos.is_flat());
        assert!(Position::new("AAA", 0).is_flat());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn decodes_legacy_ticket_key() {
        let pos: Position = serde_json::from_str(r#"{"ticket":"PETR4","amount":300}"#).unwrap();
        assert_eq!(pos, Position::new("PETR4", 300));

        let json = serde_json::to_string(&pos).unwrap();
        assert_eq!(json, r#"{"ticker":"PETR4","amount":300}"#);
    }
}
