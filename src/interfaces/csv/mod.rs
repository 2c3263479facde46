//! CSV adapters for the batch driver.

pub mod record_reader;
pub mod trader_writer;

use crate::domain::money::Money;
use serde::Deserialize;

/// A trader to register before the order script runs.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct TraderSeed {
    pub name: String,
    pub company: String,
    pub balance: Money,
}
