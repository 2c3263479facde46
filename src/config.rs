use crate::domain::money::Money;
use crate::error::{Result, TradeError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// A bulk-holding discount: holding at least `min_quantity` units of a
/// product lowers its purchase price by `rate`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DiscountTier {
    pub min_quantity: u32,
    pub rate: Decimal,
}

/// Tunable economic constants of the engine.
///
/// Every field has a default, so a JSON config file only needs the values it
/// overrides.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Discount tiers. Kept sorted by descending `min_quantity`.
    pub discount_tiers: Vec<DiscountTier>,
    /// Daily cost per occupied warehouse unit.
    pub occupied_unit_cost: Money,
    /// Daily cost per empty warehouse unit.
    pub empty_unit_cost: Money,
    /// One-off cost per unit of added warehouse capacity.
    pub capacity_unit_cost: Money,
    /// Capacity given to traders registered through the service.
    pub starting_capacity: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            discount_tiers: vec![
                DiscountTier {
                    min_quantity: 75,
                    rate: dec!(0.10),
                },
                DiscountTier {
                    min_quantity: 50,
                    rate: dec!(0.05),
                },
                DiscountTier {
                    min_quantity: 25,
                    rate: dec!(0.02),
                },
            ],
            occupied_unit_cost: Money::new(dec!(5)),
            empty_unit_cost: Money::new(dec!(1)),
            capacity_unit_cost: Money::new(dec!(50)),
            starting_capacity: 100,
        }
    }
}

impl EngineConfig {
    /// Reads a JSON config, validating it and normalising the tier order.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let config: Self = serde_json::from_reader(reader)?;
        config.normalized()
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Checks every rate lies in `[0, 1]` and every cost is non-negative,
    /// then sorts tiers highest threshold first so the first match wins.
    pub fn normalized(mut self) -> Result<Self> {
        if let Some(tier) = self
            .discount_tiers
            .iter()
            .find(|tier| tier.rate < Decimal::ZERO || tier.rate > Decimal::ONE)
        {
            return Err(TradeError::ValidationError(format!(
                "Discount rate {} for {} units is outside [0, 1]",
                tier.rate, tier.min_quantity
            )));
        }
        let costs = [
            ("occupied_unit_cost", self.occupied_unit_cost),
            ("empty_unit_cost", self.empty_unit_cost),
            ("capacity_unit_cost", self.capacity_unit_cost),
        ];
        if let Some((name, cost)) = costs.iter().find(|(_, cost)| cost.is_negative()) {
            return Err(TradeError::ValidationError(format!(
                "{name} must not be negative, got {cost}"
            )));
        }

        self.discount_tiers
            .sort_by(|a, b| b.min_quantity.cmp(&a.min_quantity));
        Ok(self)
    }
}
