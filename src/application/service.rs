use crate::application::engine::TransactionEngine;
use crate::domain::money::Money;
use crate::domain::order::{Order, OrderType};
use crate::domain::ports::{ProductCatalogBox, TraderStoreBox};
use crate::domain::product::{Product, ProductId};
use crate::domain::trader::Trader;
use crate::error::{Result, TradeError};

/// End-of-day figures for one trader, captured before the daily reset.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyReport {
    pub trader: String,
    pub previous_day_balance: Money,
    pub balance: Money,
    pub expenses: Money,
    pub earnings: Money,
    pub storage_costs: Money,
    pub bankrupt: bool,
}

/// Service object wiring the [`TransactionEngine`] to the trader store and
/// the product catalog.
///
/// Entities are loaded from the stores, handed to the engine by mutable
/// reference and written back only when the engine accepted the operation.
/// Store calls are awaited one after another.
pub struct TraderService {
    engine: TransactionEngine,
    traders: TraderStoreBox,
    catalog: ProductCatalogBox,
}

impl TraderService {
    pub fn new(
        engine: TransactionEngine,
        traders: TraderStoreBox,
        catalog: ProductCatalogBox,
    ) -> Self {
        Self {
            engine,
            traders,
            catalog,
        }
    }

    pub fn engine(&self) -> &TransactionEngine {
        &self.engine
    }

    pub async fn create_and_store_trader(
        &self,
        name: &str,
        company: &str,
        initial_balance: Money,
    ) -> Result<Trader> {
        // Orders address traders by name, so active names must be unique.
        if self.traders.find_by_name(name).await?.is_some() {
            return Err(TradeError::ValidationError(format!(
                "An active trader named {name} already exists"
            )));
        }
        let trader = Trader::new(name, company, initial_balance)
            .with_capacity(self.engine.config().starting_capacity);
        self.traders.add_trader(trader.clone()).await?;
        tracing::debug!(trader = %trader.name, id = %trader.id, "trader registered");
        Ok(trader)
    }

    pub async fn add_product(&self, product: Product) -> Result<()> {
        self.catalog.store(product).await
    }

    pub async fn retrieve_traders(&self) -> Result<Vec<Trader>> {
        self.traders.retrieve_traders().await
    }

    pub async fn retrieve_bankrupt_traders(&self) -> Result<Vec<Trader>> {
        self.traders.retrieve_bankrupt_traders().await
    }

    /// Catalog entries for every product in the trader's warehouse.
    pub async fn owned_products(&self, trader: &Trader) -> Result<Vec<Product>> {
        let mut products = Vec::with_capacity(trader.warehouse.len());
        for id in trader.warehouse.keys() {
            if let Some(product) = self.catalog.get(*id).await? {
                products.push(product);
            }
        }
        Ok(products)
    }

    pub async fn find_product_by_id(&self, id: ProductId) -> Result<Option<Product>> {
        self.catalog.get(id).await
    }

    /// Moves a trader from the active collection to the bankrupt one.
    pub async fn add_bankrupt_trader(&self, trader: Trader) -> Result<()> {
        self.traders.remove_trader(trader.id).await?;
        tracing::info!(
            trader = %trader.name,
            balance = %trader.account_balance,
            "trader went bankrupt"
        );
        self.traders.add_bankrupt_trader(trader).await
    }

    /// Whether `trader` is the last entry of the active collection.
    pub async fn is_last_bankrupted(&self, trader: &Trader) -> Result<bool> {
        let traders = self.traders.retrieve_traders().await?;
        Ok(traders.last().is_some_and(|last| last.id == trader.id))
    }

    pub async fn purchase(
        &self,
        trader_name: &str,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<Money> {
        let mut trader = self.active_trader(trader_name).await?;
        let mut product = self.product(product_id).await?;
        let cost = self.engine.purchase_product(&mut trader, &mut product, quantity)?;
        self.catalog.store(product).await?;
        self.traders.update_trader(trader).await?;
        Ok(cost)
    }

    pub async fn sell(
        &self,
        trader_name: &str,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<Money> {
        let mut trader = self.active_trader(trader_name).await?;
        let product = self.product(product_id).await?;
        let revenue = self.engine.sell_product(&mut trader, &product, quantity)?;
        self.traders.update_trader(trader).await?;
        Ok(revenue)
    }

    pub async fn expand_warehouse(
        &self,
        trader_name: &str,
        increase_amount: u32,
    ) -> Result<Money> {
        let mut trader = self.active_trader(trader_name).await?;
        let cost = self
            .engine
            .increase_warehouse_capacity(&mut trader, increase_amount)?;
        self.traders.update_trader(trader).await?;
        Ok(cost)
    }

    /// Runs the day boundary for every active trader, in order.
    ///
    /// Storage costs are charged first. A trader whose charge is refused, or
    /// whose balance is at or below zero afterwards, is moved to the bankrupt
    /// collection. Everyone else gets a report and a fresh daily ledger.
    pub async fn close_day(&self) -> Result<Vec<DailyReport>> {
        let traders = self.traders.retrieve_traders().await?;
        let mut reports = Vec::with_capacity(traders.len());

        for mut trader in traders {
            let bankrupt = match self.engine.deduct_storage_costs(&mut trader) {
                Ok(_) => !trader.account_balance.is_positive(),
                Err(TradeError::InsufficientFunds { .. }) => true,
                Err(e) => return Err(e),
            };

            reports.push(DailyReport {
                trader: trader.name.clone(),
                previous_day_balance: trader.previous_day_balance,
                balance: trader.account_balance,
                expenses: trader.daily_expenses,
                earnings: trader.daily_earnings,
                storage_costs: trader.daily_storage_costs,
                bankrupt,
            });

            if bankrupt {
                self.add_bankrupt_trader(trader).await?;
            } else {
                self.engine.reset_daily_report(&mut trader);
                self.traders.update_trader(trader).await?;
            }
        }

        tracing::info!(traders = reports.len(), "day closed");
        Ok(reports)
    }

    /// Applies a single scripted order.
    pub async fn process_order(&self, order: Order) -> Result<()> {
        match order.r#type {
            OrderType::Buy => {
                let (trader, product, quantity) = trade_fields(&order)?;
                self.purchase(trader, product, quantity).await?;
            }
            OrderType::Sell => {
                let (trader, product, quantity) = trade_fields(&order)?;
                self.sell(trader, product, quantity).await?;
            }
            OrderType::Expand => {
                let trader = required(order.trader.as_deref(), "trader")?;
                let quantity = required(order.quantity, "quantity")?;
                self.expand_warehouse(trader, quantity).await?;
            }
            OrderType::EndDay => {
                for report in self.close_day().await? {
                    tracing::info!(
                        trader = %report.trader,
                        previous = %report.previous_day_balance,
                        balance = %report.balance,
                        expenses = %report.expenses,
                        earnings = %report.earnings,
                        storage = %report.storage_costs,
                        bankrupt = report.bankrupt,
                        "daily report"
                    );
                }
            }
        }
        Ok(())
    }

    async fn active_trader(&self, name: &str) -> Result<Trader> {
        self.traders
            .find_by_name(name)
            .await?
            .ok_or_else(|| TradeError::TraderNotFound(name.to_string()))
    }

    async fn product(&self, id: ProductId) -> Result<Product> {
        self.catalog
            .get(id)
            .await?
            .ok_or(TradeError::ProductNotFound(id))
    }
}

fn required<T>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| TradeError::ValidationError(format!("Missing {field}")))
}

fn trade_fields(order: &Order) -> Result<(&str, ProductId, u32)> {
    Ok((
        required(order.trader.as_deref(), "trader")?,
        required(order.product, "product")?,
        required(order.quantity, "quantity")?,
    ))
}
