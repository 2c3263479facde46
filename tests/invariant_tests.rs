use middleman::application::engine::TransactionEngine;
use middleman::domain::product::Product;
use middleman::domain::trader::Trader;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal_macros::dec;

mod common;

fn assert_invariants(trader: &Trader) {
    assert!(
        trader.occupied_units() <= u64::from(trader.max_storage_capacity),
        "occupied {} exceeds capacity {}",
        trader.occupied_units(),
        trader.max_storage_capacity
    );
    assert!(
        trader.warehouse.values().all(|&units| units > 0),
        "warehouse holds a zero entry: {:?}",
        trader.warehouse
    );
}

#[test]
fn test_random_operation_sequences_keep_invariants() {
    let engine = TransactionEngine::default();
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..50 {
        let mut trader = common::trader(dec!(5000), 120);
        let mut products: Vec<Product> = (1..=4)
            .map(|id| common::product(id, dec!(7), dec!(9), 400))
            .collect();

        for _ in 0..300 {
            let index = rng.gen_range(0..products.len());
            let quantity = rng.gen_range(0..40);
            let before = (trader.clone(), products[index].clone());

            let result = match rng.gen_range(0..5) {
                0 | 1 => engine
                    .purchase_product(&mut trader, &mut products[index], quantity)
                    .map(|_| ()),
                2 | 3 => engine
                    .sell_product(&mut trader, &products[index], quantity)
                    .map(|_| ()),
                _ => engine
                    .increase_warehouse_capacity(&mut trader, quantity / 4)
                    .map(|_| ()),
            };

            if result.is_err() {
                assert_eq!((trader.clone(), products[index].clone()), before);
            }
            assert_invariants(&trader);
        }
    }
}

#[test]
fn test_market_stock_only_decreases() {
    let engine = TransactionEngine::default();
    let mut rng = StdRng::seed_from_u64(42);
    let mut trader = common::trader(dec!(100000), 1000);
    let mut product = common::product(1, dec!(3), dec!(4), 500);

    let mut last_available = product.available_quantity;
    for _ in 0..200 {
        let quantity = rng.gen_range(1..20);
        if rng.gen_bool(0.5) {
            let _ = engine.purchase_product(&mut trader, &mut product, quantity);
        } else {
            let _ = engine.sell_product(&mut trader, &product, quantity);
        }
        assert!(product.available_quantity <= last_available);
        last_available = product.available_quantity;
    }
}
