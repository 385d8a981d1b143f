//! Core types: Ticker, Price, Quantity

use std::borrow::Borrow;
use std::fmt;

use crate::error::ParseCashError;

/// Symbol identifying a tradeable asset (e.g., `"PETR4"`, `"AAPL"`).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Ticker(String);

impl Ticker {
    pub fn new(s: impl Into<String>) -> Self {
        Ticker(s.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Forward padding/alignment so tickers line up in tables
        f.pad(&self.0)
    }
}

impl From<&str> for Ticker {
    fn from(s: &str) -> Self {
        Ticker::new(s)
    }
}

impl From<String> for Ticker {
    fn from(s: String) -> Self {
        Ticker(s)
    }
}

impl Borrow<str> for Ticker {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Price per share in cents.
///
/// `Price(10050)` represents $100.50. All engine arithmetic is done on
/// integer cents so that share counts and trade values floor exactly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Price(pub i64);

impl Price {
    pub const ZERO: Price = Price(0);

    /// Convert a decimal quote (e.g., `36.57`) to cents, rounding to the nearest cent.
    ///
    /// Returns `None` for NaN, infinities, and values outside the `i64` cent range.
    pub fn from_decimal(value: f64) -> Option<Price> {
        if !value.is_finite() {
            return None;
        }
        let cents = (value * 100.0).round();
        if cents < i64::MIN as f64 || cents > i64::MAX as f64 {
            return None;
        }
        Some(Price(cents as i64))
    }

    /// Value of `quantity` shares at this price (cents).
    ///
    /// `None` when the product does not fit in `i64` cents.
    #[inline]
    pub fn value_of(self, quantity: Quantity) -> Option<i64> {
        i64::try_from(quantity)
            .ok()
            .and_then(|q| self.0.checked_mul(q))
    }

    #[inline]
    pub fn is_positive(self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format_cents(self.0))
    }
}

/// Number of whole shares. No fractional shares.
pub type Quantity = u64;

/// Render a cent amount as `$D.CC` (or `-$D.CC`).
pub fn format_cents(cents: i64) -> String {
    let dollars = cents / 100;
    let rem = (cents % 100).abs();
    if cents < 0 {
        format!("-${}.{:02}", dollars.abs(), rem)
    } else {
        format!("${}.{:02}", dollars, rem)
    }
}

/// Parse a non-negative decimal amount (`"1000"`, `"1000.5"`, `"1000.55"`) into cents.
pub fn parse_cents(input: &str) -> Result<i64, ParseCashError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(ParseCashError::Empty);
    }
    if s.starts_with('-') {
        return Err(ParseCashError::Negative(s.to_string()));
    }

    let (whole, frac) = match s.split_once('.') {
        Some((w, f)) => (w, f),
        None => (s, ""),
    };
    if frac.len() > 2 {
        return Err(ParseCashError::TooPrecise(s.to_string()));
    }
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && frac.is_empty()) || !all_digits(whole) || !all_digits(frac) {
        return Err(ParseCashError::Invalid(s.to_string()));
    }

    let whole: i64 = if whole.is_empty() {
        0
    } else {
        whole
            .parse()
            .map_err(|_| ParseCashError::Invalid(s.to_string()))?
    };
    let frac: i64 = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().map_err(|_| ParseCashError::Invalid(s.to_string()))? * 10,
        _ => frac.parse().map_err(|_| ParseCashError::Invalid(s.to_string()))?,
    };

    whole
        .checked_mul(100)
        .and_then(|c| c.checked_add(frac))
        .ok_or_else(|| ParseCashError::Invalid(s.to_string()))
}
