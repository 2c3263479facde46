use crate::domain::ports::{ProductCatalog, TraderStore};
use crate::domain::product::{Product, ProductId};
use crate::domain::trader::{Trader, TraderId};
use crate::error::{Result, TradeError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct TraderCollections {
    active: Vec<Trader>,
    bankrupt: Vec<Trader>,
}

/// A thread-safe in-memory store for traders.
///
/// Active traders live in a `Vec` so that "the last active trader" is
/// well defined. Both collections sit behind one lock, which keeps the
/// active-to-bankrupt move consistent for readers.
#[derive(Default, Clone)]
pub struct InMemoryTraderStore {
    traders: Arc<RwLock<TraderCollections>>,
}

impl InMemoryTraderStore {
    /// Creates a new, empty in-memory trader store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TraderStore for InMemoryTraderStore {
    async fn add_trader(&self, trader: Trader) -> Result<()> {
        let mut traders = self.traders.write().await;
        traders.active.push(trader);
        Ok(())
    }

    async fn update_trader(&self, trader: Trader) -> Result<()> {
        let mut traders = self.traders.write().await;
        let slot = traders
            .active
            .iter_mut()
            .find(|t| t.id == trader.id)
            .ok_or_else(|| TradeError::TraderNotFound(trader.name.clone()))?;
        *slot = trader;
        Ok(())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Trader>> {
        let traders = self.traders.read().await;
        Ok(traders.active.iter().find(|t| t.name == name).cloned())
    }

    async fn remove_trader(&self, id: TraderId) -> Result<Option<Trader>> {
        let mut traders = self.traders.write().await;
        let index = traders.active.iter().position(|t| t.id == id);
        Ok(index.map(|index| traders.active.remove(index)))
    }

    async fn add_bankrupt_trader(&self, trader: Trader) -> Result<()> {
        let mut traders = self.traders.write().await;
        traders.bankrupt.push(trader);
        Ok(())
    }

    async fn retrieve_traders(&self) -> Result<Vec<Trader>> {
        let traders = self.traders.read().await;
        Ok(traders.active.clone())
    }

    async fn retrieve_bankrupt_traders(&self) -> Result<Vec<Trader>> {
        let traders = self.traders.read().await;
        Ok(traders.bankrupt.clone())
    }
}

/// A thread-safe in-memory product catalog keyed by product id.
#[derive(Default, Clone)]
pub struct InMemoryProductCatalog {
    products: Arc<RwLock<HashMap<ProductId, Product>>>,
}

impl InMemoryProductCatalog {
    /// Creates a new, empty in-memory catalog.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductCatalog for InMemoryProductCatalog {
    async fn store(&self, product: Product) -> Result<()> {
        let mut products = self.products.write().await;
        products.insert(product.id, product);
        Ok(())
    }

    async fn get(&self, id: ProductId) -> Result<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::money::Money;
    use crate::domain::product::Price;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_in_memory_trader_store_keeps_order() {
        let store = InMemoryTraderStore::new();
        let ada = Trader::new("Ada", "Ada Trading", Money::new(dec!(100)));
        let bob = Trader::new("Bob", "Bob & Sons", Money::new(dec!(100)));

        store.add_trader(ada.clone()).await.unwrap();
        store.add_trader(bob.clone()).await.unwrap();

        let all = store.retrieve_traders().await.unwrap();
        assert_eq!(all, vec![ada.clone(), bob]);
        assert_eq!(store.find_by_name("Ada").await.unwrap(), Some(ada));
        assert!(store.find_by_name("Eve").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_replaces_in_place() {
        let store = InMemoryTraderStore::new();
        let mut ada = Trader::new("Ada", "Ada Trading", Money::new(dec!(100)));
        let bob = Trader::new("Bob", "Bob & Sons", Money::new(dec!(100)));
        store.add_trader(ada.clone()).await.unwrap();
        store.add_trader(bob).await.unwrap();

        ada.account_balance = Money::new(dec!(5));
        store.update_trader(ada.clone()).await.unwrap();

        let all = store.retrieve_traders().await.unwrap();
        assert_eq!(all[0], ada);
        assert_eq!(all[1].name, "Bob");
    }

    #[tokio::test]
    async fn test_update_unknown_trader_fails() {
        let store = InMemoryTraderStore::new();
        let ghost = Trader::new("Ghost", "None", Money::ZERO);
        assert!(matches!(
            store.update_trader(ghost).await,
            Err(TradeError::TraderNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_remove_and_bankrupt() {
        let store = InMemoryTraderStore::new();
        let ada = Trader::new("Ada", "Ada Trading", Money::new(dec!(100)));
        store.add_trader(ada.clone()).await.unwrap();

        let removed = store.remove_trader(ada.id).await.unwrap();
        assert_eq!(removed, Some(ada.clone()));
        assert!(store.remove_trader(ada.id).await.unwrap().is_none());

        store.add_bankrupt_trader(ada.clone()).await.unwrap();
        assert!(store.retrieve_traders().await.unwrap().is_empty());
        assert_eq!(store.retrieve_bankrupt_traders().await.unwrap(), vec![ada]);
    }

    #[tokio::test]
    async fn test_in_memory_product_catalog() {
        let catalog = InMemoryProductCatalog::new();
        let price = |value| Price::new(value).unwrap();
        let salt = Product::new(ProductId(2), "Salt", price(dec!(1)), price(dec!(2)), 10);
        let silk = Product::new(ProductId(1), "Silk", price(dec!(30)), price(dec!(45)), 5);

        catalog.store(salt.clone()).await.unwrap();
        catalog.store(silk.clone()).await.unwrap();

        assert_eq!(catalog.get(ProductId(2)).await.unwrap(), Some(salt.clone()));
        assert_eq!(catalog.get(ProductId(1)).await.unwrap(), Some(silk));
        assert!(catalog.get(ProductId(3)).await.unwrap().is_none());
    }
}
