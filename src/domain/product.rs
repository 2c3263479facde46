use super::money::Money;
use crate::error::TradeError;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fmt;

/// Externally assigned catalog identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A non-negative unit price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "Decimal")]
pub struct Price(Decimal);

impl Price {
    pub fn new(value: Decimal) -> Result<Self, TradeError> {
        if value >= Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(TradeError::ValidationError(
                "Price must not be negative".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn as_money(&self) -> Money {
        Money::new(self.0)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = TradeError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

/// A tradable product as offered by the market.
///
/// `available_quantity` is the market-side stock. Purchases draw it down;
/// sales never put units back.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub purchase_price: Price,
    pub selling_price: Price,
    pub available_quantity: u32,
}

impl Product {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        purchase_price: Price,
        selling_price: Price,
        available_quantity: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            purchase_price,
            selling_price,
            available_quantity,
        }
    }
}
