use crate::config::EngineConfig;
use crate::domain::money::Money;
use crate::domain::product::Product;
use crate::domain::trader::{Quantity, Trader};
use crate::error::{Result, TradeError};
use rust_decimal::Decimal;

/// The trading core.
///
/// `TransactionEngine` applies purchases, sales, capacity expansion and daily
/// bookkeeping to borrowed entities. Each operation validates everything it
/// needs before the first write, so a rejected call leaves both the trader
/// and the product untouched. The engine holds no entity state of its own.
#[derive(Debug, Clone, Default)]
pub struct TransactionEngine {
    config: EngineConfig,
}

impl TransactionEngine {
    /// Creates a new `TransactionEngine` with the given economic constants.
    ///
    /// Fails when the config carries a discount rate outside `[0, 1]` or a
    /// negative cost.
    pub fn new(config: EngineConfig) -> Result<Self> {
        Ok(Self {
            config: config.normalized()?,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Buys `quantity` units of `product` into the trader's warehouse.
    ///
    /// Checks funds, then warehouse space, then market stock. Returns the
    /// total cost debited. Amounts too large to represent are rejected as a
    /// `ValidationError` before anything is written.
    pub fn purchase_product(
        &self,
        trader: &mut Trader,
        product: &mut Product,
        quantity: u32,
    ) -> Result<Money> {
        let quantity = Quantity::new(quantity)?.value();
        let discount = self.calculate_discount(product, trader);
        let unit_price = product
            .purchase_price
            .as_money()
            .scaled(Decimal::ONE - discount)?;
        let total_cost = unit_price.times(quantity)?;
        let occupied = trader.occupied_units();
        let total_after_purchase = occupied + u64::from(quantity);

        if trader.account_balance < total_cost {
            return Err(TradeError::InsufficientFunds {
                available: trader.account_balance,
            });
        }
        if total_after_purchase > u64::from(trader.max_storage_capacity) {
            return Err(TradeError::WarehouseCapacityExceeded {
                available: trader.free_capacity(),
            });
        }
        if product.available_quantity < quantity {
            return Err(TradeError::ProductUnavailable);
        }
        let balance = trader.account_balance.checked_sub(total_cost)?;
        let expenses = trader.daily_expenses.checked_add(total_cost)?;

        product.available_quantity -= quantity;
        trader.account_balance = balance;
        trader.daily_expenses = expenses;
        trader.stock(product.id, quantity);

        tracing::debug!(
            trader = %trader.name,
            product = %product.id,
            quantity,
            %discount,
            cost = %total_cost,
            "product purchased"
        );
        Ok(total_cost)
    }

    /// Sells `quantity` held units of `product`. Returns the revenue.
    ///
    /// The market's `available_quantity` is not restocked.
    pub fn sell_product(
        &self,
        trader: &mut Trader,
        product: &Product,
        quantity: u32,
    ) -> Result<Money> {
        let quantity = Quantity::new(quantity)?.value();
        if trader.held_quantity(product.id) < quantity {
            return Err(TradeError::ProductUnavailable);
        }

        let revenue = product.selling_price.as_money().times(quantity)?;
        let balance = trader.account_balance.checked_add(revenue)?;
        let earnings = trader.daily_earnings.checked_add(revenue)?;

        trader.unstock(product.id, quantity);
        trader.account_balance = balance;
        trader.daily_earnings = earnings;

        tracing::debug!(
            trader = %trader.name,
            product = %product.id,
            quantity,
            revenue = %revenue,
            "product sold"
        );
        Ok(revenue)
    }

    /// Buys `increase_amount` extra units of warehouse capacity. Returns the
    /// cost debited.
    pub fn increase_warehouse_capacity(
        &self,
        trader: &mut Trader,
        increase_amount: u32,
    ) -> Result<Money> {
        let increase_amount = Quantity::new(increase_amount)?.value();
        let cost = self.config.capacity_unit_cost.times(increase_amount)?;
        if trader.account_balance < cost {
            return Err(TradeError::InsufficientFunds {
                available: trader.account_balance,
            });
        }
        let new_capacity = trader
            .max_storage_capacity
            .checked_add(increase_amount)
            .ok_or_else(|| {
                TradeError::ValidationError("Warehouse capacity overflow".to_string())
            })?;

        let balance = trader.account_balance.checked_sub(cost)?;

        trader.account_balance = balance;
        trader.max_storage_capacity = new_capacity;

        tracing::debug!(
            trader = %trader.name,
            capacity = new_capacity,
            cost = %cost,
            "warehouse capacity increased"
        );
        Ok(cost)
    }

    /// Bulk discount rate for buying `product`, based only on how many units
    /// of that product the trader already holds.
    pub fn calculate_discount(&self, product: &Product, trader: &Trader) -> Decimal {
        let held = trader.held_quantity(product.id);
        self.config
            .discount_tiers
            .iter()
            .find(|tier| held >= tier.min_quantity)
            .map(|tier| tier.rate)
            .unwrap_or(Decimal::ZERO)
    }

    /// Daily upkeep: occupied units at the occupied rate plus empty units at
    /// the empty rate.
    pub fn calculate_storage_costs(&self, trader: &Trader) -> Result<Money> {
        let occupied = trader.occupied_units();
        let empty = u64::from(trader.max_storage_capacity).saturating_sub(occupied);
        self.config
            .occupied_unit_cost
            .times(occupied)?
            .checked_add(self.config.empty_unit_cost.times(empty)?)
    }

    /// Charges the daily storage costs.
    ///
    /// Only a balance at or below zero is rejected. A positive balance smaller
    /// than the cost is charged anyway and goes negative.
    pub fn deduct_storage_costs(&self, trader: &mut Trader) -> Result<Money> {
        let storage_costs = self.calculate_storage_costs(trader)?;
        if !trader.account_balance.is_positive() {
            return Err(TradeError::InsufficientFunds {
                available: trader.account_balance,
            });
        }
        trader.account_balance = trader.account_balance.checked_sub(storage_costs)?;
        trader.daily_storage_costs = storage_costs;

        tracing::debug!(trader = %trader.name, cost = %storage_costs, "storage costs deducted");
        Ok(storage_costs)
    }

    /// Closes the current day: snapshots the balance and clears the daily
    /// counters.
    pub fn reset_daily_report(&self, trader: &mut Trader) {
        trader.previous_day_balance = trader.account_balance;
        trader.daily_expenses = Money::ZERO;
        trader.daily_earnings = Money::ZERO;
        trader.daily_storage_costs = Money::ZERO;
    }
}
