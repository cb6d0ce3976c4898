// Rate table resolution tests.
//
// Product-specific overrides win over tier defaults; a tier or distance
// outside 1..=4 is a configuration error, never a silent zero.

#[path = "../helpers/mod.rs"]
mod helpers;

use std::sync::Arc;

use rust_decimal_macros::dec;

use helpers::fixtures::product_rate;
use helpers::memory::{MemoryRateRepository, MemoryStore};
use tierpay::core::AppError;
use tierpay::modules::rates::models::RateDefaults;
use tierpay::modules::rates::services::RateTable;

fn rate_table(store: &Arc<MemoryStore>) -> RateTable {
    let defaults = RateDefaults::from_config(&default_commission_config());
    RateTable::new(Arc::new(MemoryRateRepository(store.clone())), defaults)
}

fn default_commission_config() -> tierpay::config::CommissionConfig {
    tierpay::config::CommissionConfig {
        direct_rates: [dec!(30), dec!(25), dec!(20), dec!(15)],
        bonus_rates: [dec!(10), dec!(8), dec!(6), dec!(4)],
        max_aggregate_rate: dec!(60),
        auto_confirm_direct: false,
    }
}

#[tokio::test]
async fn test_product_specific_rate_wins() {
    let store = MemoryStore::new();
    store.insert_product_rate(product_rate("product-a", 1, dec!(35)));

    let table = rate_table(&store);
    assert_eq!(table.direct_rate(1, "product-a").await.unwrap(), dec!(35));
}

#[tokio::test]
async fn test_unknown_product_falls_back_to_tier_default() {
    let store = MemoryStore::new();
    let table = rate_table(&store);

    assert_eq!(table.direct_rate(1, "unknown").await.unwrap(), dec!(30));
    assert_eq!(table.direct_rate(4, "unknown").await.unwrap(), dec!(15));
}

#[tokio::test]
async fn test_inactive_product_rate_is_ignored() {
    let store = MemoryStore::new();
    let mut rate = product_rate("product-a", 2, dec!(40));
    rate.is_active = false;
    store.insert_product_rate(rate);

    let table = rate_table(&store);
    assert_eq!(table.direct_rate(2, "product-a").await.unwrap(), dec!(25));
}

#[tokio::test]
async fn test_tier_out_of_range_fails() {
    let store = MemoryStore::new();
    let table = rate_table(&store);

    for tier in [0, 5, -1] {
        let err = table.direct_rate(tier, "product-a").await.unwrap_err();
        assert!(
            matches!(err, AppError::ConfigurationMissing(_)),
            "tier {} should be ConfigurationMissing, got {:?}",
            tier,
            err
        );
    }
}

#[tokio::test]
async fn test_bonus_rates_decay_by_distance() {
    let store = MemoryStore::new();
    let table = rate_table(&store);

    assert_eq!(table.bonus_rate(1).unwrap(), dec!(10));
    assert_eq!(table.bonus_rate(2).unwrap(), dec!(8));
    assert_eq!(table.bonus_rate(3).unwrap(), dec!(6));
    assert_eq!(table.bonus_rate(4).unwrap(), dec!(4));
}

#[tokio::test]
async fn test_bonus_distance_out_of_range_fails() {
    let store = MemoryStore::new();
    let table = rate_table(&store);

    for distance in [0, 5] {
        let err = table.bonus_rate(distance).unwrap_err();
        assert!(matches!(err, AppError::ConfigurationMissing(_)));
    }
}
