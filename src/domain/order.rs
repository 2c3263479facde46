use super::product::ProductId;
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    Buy,
    Sell,
    Expand,
    EndDay,
}

/// One scripted instruction for the simulation driver.
///
/// `trader` is a trader name. `product` is only read by buy and sell,
/// `quantity` by buy, sell and expand.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct Order {
    pub r#type: OrderType,
    #[serde(default)]
    pub trader: Option<String>,
    #[serde(default)]
    pub product: Option<ProductId>,
    #[serde(default)]
    pub quantity: Option<u32>,
}
