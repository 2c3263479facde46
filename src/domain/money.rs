use crate::error::{Result, TradeError};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fmt;
use std::ops::{Add, Sub};

/// A signed monetary value.
///
/// Wraps `rust_decimal::Decimal` so prices and balances never pick up binary
/// floating point error. Balances may legitimately go negative (storage costs
/// are charged even when they cannot be covered), so no sign is enforced here.
///
/// The engine only uses the `checked_*` operations; an overflow surfaces as a
/// `ValidationError` instead of a panic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize)]
#[serde(transparent)]
pub struct Money(pub Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Price of `units` items at this unit price.
    pub fn times(self, units: impl Into<Decimal>) -> Result<Self> {
        self.0
            .checked_mul(units.into())
            .map(Self)
            .ok_or_else(overflow)
    }

    /// Scales by a rate, e.g. `price.scaled(1 - discount)`.
    pub fn scaled(self, rate: Decimal) -> Result<Self> {
        self.0.checked_mul(rate).map(Self).ok_or_else(overflow)
    }

    pub fn checked_add(self, rhs: Self) -> Result<Self> {
        self.0.checked_add(rhs.0).map(Self).ok_or_else(overflow)
    }

    pub fn checked_sub(self, rhs: Self) -> Result<Self> {
        self.0.checked_sub(rhs.0).map(Self).ok_or_else(overflow)
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }
}

fn overflow() -> TradeError {
    TradeError::ValidationError("Monetary amount out of range".to_string())
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}
