#![allow(dead_code)]

use middleman::domain::money::Money;
use middleman::domain::product::{Price, Product, ProductId};
use middleman::domain::trader::Trader;
use rust_decimal::Decimal;
use std::io::Write;
use tempfile::NamedTempFile;

pub fn trader(balance: Decimal, capacity: u32) -> Trader {
    Trader::new("Ada", "Ada Trading", Money::new(balance)).with_capacity(capacity)
}

pub fn product(id: u32, purchase: Decimal, selling: Decimal, available: u32) -> Product {
    Product::new(
        ProductId(id),
        format!("product-{id}"),
        Price::new(purchase).unwrap(),
        Price::new(selling).unwrap(),
        available,
    )
}

/// Writes `lines` to a temporary CSV file that lives as long as the handle.
pub fn csv_file(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    file
}

pub fn products_csv() -> NamedTempFile {
    csv_file(&[
        "id, name, purchase_price, selling_price, available_quantity",
        "1, Salt, 10, 15, 50",
        "2, Silk, 30, 45, 20",
    ])
}
