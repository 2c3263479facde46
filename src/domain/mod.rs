//! Domain entities and the ports the application layer depends on.

pub mod money;
pub mod order;
pub mod ports;
pub mod product;
pub mod trader;
