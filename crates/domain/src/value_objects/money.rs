//! Non-negative money amounts used for buy-ins, cash-outs and debts.

use std::fmt;
use std::iter::Sum;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A non-negative amount of money.
///
/// Signed results (profit/loss) are plain `Decimal`s; only amounts a player can hand over
/// are `Money`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Largest accepted amount (10^15). Sums of capped amounts stay far inside `Decimal`'s
    /// range, so ledger totals can be added without overflow checks.
    pub const MAX: Money = Money(Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0));

    /// # Errors
    ///
    /// Returns `DomainError::Validation` when `amount` is negative or above [`Money::MAX`].
    pub fn new(amount: Decimal) -> Result<Self, DomainError> {
        if amount < Decimal::ZERO {
            return Err(DomainError::validation("Amount cannot be negative"));
        }
        Self::capped(amount)
    }

    /// Like [`Money::new`] but also rejects zero.
    pub fn positive(amount: Decimal) -> Result<Self, DomainError> {
        if amount <= Decimal::ZERO {
            return Err(DomainError::validation("Amount must be greater than zero"));
        }
        Self::capped(amount)
    }

    fn capped(amount: Decimal) -> Result<Self, DomainError> {
        if amount > Self::MAX.0 {
            return Err(DomainError::validation(format!(
                "Amount cannot exceed {}",
                Self::MAX.0
            )));
        }
        Ok(Self(amount.normalize()))
    }

    pub fn from_units(units: u32) -> Self {
        Self(Decimal::from(units))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<Decimal> for Money {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Self {
        value.0
    }
}

/// Totals are not capped: they may exceed [`Money::MAX`] but cannot overflow.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        Self(iter.map(|m| m.0).sum())
    }
}
