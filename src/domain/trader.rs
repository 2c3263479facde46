use super::money::Money;
use super::product::ProductId;
use crate::error::TradeError;
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Stable identity of a trader. Name and company are descriptive only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TraderId(pub Uuid);

impl TraderId {
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }
}

impl fmt::Display for TraderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A strictly positive number of units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Quantity(u32);

impl Quantity {
    pub fn new(units: u32) -> Result<Self, TradeError> {
        if units > 0 {
            Ok(Self(units))
        } else {
            Err(TradeError::ValidationError(
                "Quantity must be positive".to_string(),
            ))
        }
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for Quantity {
    type Error = TradeError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

/// The middleman: cash, daily bookkeeping and a capacity-bounded warehouse.
///
/// The warehouse never holds zero entries; a product whose last unit is sold
/// is removed from the map. Capacity is enforced when buying, so
/// `occupied_units() <= max_storage_capacity` holds for every state reached
/// through the engine.
#[derive(Debug, PartialEq, Clone)]
pub struct Trader {
    pub id: TraderId,
    pub name: String,
    pub company: String,
    pub account_balance: Money,
    /// Balance snapshot taken at the last day boundary.
    pub previous_day_balance: Money,
    pub daily_expenses: Money,
    pub daily_earnings: Money,
    pub daily_storage_costs: Money,
    pub warehouse: BTreeMap<ProductId, u32>,
    pub max_storage_capacity: u32,
}

impl Trader {
    pub fn new(name: impl Into<String>, company: impl Into<String>, initial_balance: Money) -> Self {
        Self {
            id: TraderId::generate(),
            name: name.into(),
            company: company.into(),
            account_balance: initial_balance,
            previous_day_balance: initial_balance,
            daily_expenses: Money::ZERO,
            daily_earnings: Money::ZERO,
            daily_storage_costs: Money::ZERO,
            warehouse: BTreeMap::new(),
            max_storage_capacity: 0,
        }
    }

    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.max_storage_capacity = capacity;
        self
    }

    /// Units of `product` currently held, 0 if none.
    pub fn held_quantity(&self, product: ProductId) -> u32 {
        self.warehouse.get(&product).copied().unwrap_or(0)
    }

    /// Sum of all held units.
    pub fn occupied_units(&self) -> u64 {
        self.warehouse.values().map(|&units| u64::from(units)).sum()
    }

    /// Capacity not yet taken by stock.
    pub fn free_capacity(&self) -> u32 {
        let free = u64::from(self.max_storage_capacity).saturating_sub(self.occupied_units());
        u32::try_from(free).unwrap_or(u32::MAX)
    }

    pub(crate) fn stock(&mut self, product: ProductId, units: u32) {
        *self.warehouse.entry(product).or_insert(0) += units;
    }

    /// Removes `units` of `product`, dropping the entry when it reaches zero.
    /// Callers check `held_quantity` first.
    pub(crate) fn unstock(&mut self, product: ProductId, units: u32) {
        if let Some(held) = self.warehouse.get_mut(&product) {
            *held = held.saturating_sub(units);
            if *held == 0 {
                self.warehouse.remove(&product);
            }
        }
    }
}
