use super::product::{Product, ProductId};
use super::trader::{Trader, TraderId};
use crate::error::Result;
use async_trait::async_trait;

/// Repository for traders, split into an ordered active collection and a
/// bankrupt collection.
#[async_trait]
pub trait TraderStore: Send + Sync {
    /// Appends a trader to the end of the active collection.
    async fn add_trader(&self, trader: Trader) -> Result<()>;
    /// Replaces the stored copy of an active trader, keeping its position.
    async fn update_trader(&self, trader: Trader) -> Result<()>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Trader>>;
    /// Removes a trader from the active collection.
    async fn remove_trader(&self, id: TraderId) -> Result<Option<Trader>>;
    async fn add_bankrupt_trader(&self, trader: Trader) -> Result<()>;
    /// Active traders in insertion order.
    async fn retrieve_traders(&self) -> Result<Vec<Trader>>;
    async fn retrieve_bankrupt_traders(&self) -> Result<Vec<Trader>>;
}

#[async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn store(&self, product: Product) -> Result<()>;
    async fn get(&self, id: ProductId) -> Result<Option<Product>>;
}

pub type TraderStoreBox = Box<dyn TraderStore>;
pub type ProductCatalogBox = Box<dyn ProductCatalog>;
