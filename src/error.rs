use crate::domain::money::Money;
use crate::domain::product::ProductId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TradeError>;

#[derive(Error, Debug)]
pub enum TradeError {
    #[error("Insufficient funds. Available balance: {available}")]
    InsufficientFunds { available: Money },
    #[error("Warehouse capacity exceeded. Available space: {available} units")]
    WarehouseCapacityExceeded { available: u32 },
    #[error("Product unavailable in the requested quantity")]
    ProductUnavailable,
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Trader not found: {0}")]
    TraderNotFound(String),
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Config error: {0}")]
    ConfigError(#[from] serde_json::Error),
}
