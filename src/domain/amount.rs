//! Money type
//!
//! Domain primitive for order totals. Totals arrive as text such as
//! `"12.34 USD"`; only the numeric prefix is significant because every
//! amount in the stream shares a single currency unit.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest accepted order total (1 trillion, 0xE8_D4A5_1000)
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Money represents a validated, non-negative order total.
///
/// # Invariants
/// - Value is never negative
/// - Value is at most `MAX_AMOUNT`
///
/// # Example
/// ```
/// use rust_decimal::Decimal;
/// use customer_ltv::domain::Money;
///
/// let money: Money = "12.34 USD".parse().unwrap();
/// assert_eq!(money.value(), Decimal::new(1234, 2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Money(Decimal);

/// Errors that can occur when parsing an order total
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("Amount must not be negative (got {0})")]
    Negative(Decimal),

    #[error("Amount exceeds maximum allowed value ({MAX_AMOUNT}, got {0})")]
    TooLarge(Decimal),

    #[error("Invalid amount format: {0}")]
    Parse(String),

    #[error("Running total would overflow")]
    Overflow,
}

impl Money {
    /// Create a new Money value with validation.
    ///
    /// # Errors
    /// - `AmountError::Negative` if value < 0
    /// - `AmountError::TooLarge` if value > `MAX_AMOUNT`
    pub fn new(value: Decimal) -> Result<Self, AmountError> {
        if value < Decimal::ZERO {
            return Err(AmountError::Negative(value));
        }
        if value > MAX_AMOUNT {
            return Err(AmountError::TooLarge(value));
        }
        Ok(Self(value))
    }

    /// Zero total
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Get the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Signed difference `self - previous`, used to correct a running total
    /// when an order is revised.
    pub fn delta_from(&self, previous: &Money) -> Decimal {
        self.0 - previous.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl FromStr for Money {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        // "12.34 USD" -> "12.34"; the currency suffix is ignored
        let numeric = trimmed.split(' ').next().unwrap_or_default();
        if numeric.is_empty() {
            return Err(AmountError::Parse(s.to_string()));
        }

        let decimal = Decimal::from_str(numeric)
            .map_err(|e| AmountError::Parse(format!("{s:?}: {e}")))?;
        Money::new(decimal)
    }
}

impl TryFrom<String> for Money {
    type Error = AmountError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Money::from_str(&value)
    }
}

impl From<Money> for String {
    fn from(money: Money) -> Self {
        money.0.to_string()
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}
