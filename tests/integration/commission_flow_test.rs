// End-to-end commission flow:
// confirmed sale -> hierarchy walk -> calculation -> record replacement ->
// ledger aggregation -> bonus approval -> payout.

#[path = "../helpers/mod.rs"]
mod helpers;

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use helpers::fixtures::{confirmed_sale, corporate_agency, individual_agency};
use helpers::memory::{
    MemoryAgencyRepository, MemoryBonusRepository, MemoryCommissionRepository,
    MemoryLedgerRepository, MemoryPaymentRepository, MemoryRateRepository, MemorySaleRepository,
    MemoryStore,
};
use tierpay::config::CommissionConfig;
use tierpay::core::{AppError, Period};
use tierpay::modules::agencies::services::HierarchyWalker;
use tierpay::modules::commissions::services::{
    CommissionCalculator, CommissionLedger, CommissionService,
};
use tierpay::modules::rates::models::RateDefaults;
use tierpay::modules::rates::services::RateTable;
use tierpay::modules::sales::models::SaleStatus;
use tierpay::modules::taxes::services::TaxEvaluator;

fn config() -> CommissionConfig {
    CommissionConfig {
        direct_rates: [dec!(30), dec!(25), dec!(20), dec!(15)],
        bonus_rates: [dec!(10), dec!(8), dec!(6), dec!(4)],
        max_aggregate_rate: dec!(60),
        auto_confirm_direct: false,
    }
}

struct TestStack {
    store: Arc<MemoryStore>,
    service: CommissionService,
    ledger: Arc<CommissionLedger>,
}

fn build_stack() -> TestStack {
    let store = MemoryStore::new();
    let config = config();

    let agencies = Arc::new(MemoryAgencyRepository(store.clone()));
    let records = Arc::new(MemoryCommissionRepository(store.clone()));

    let rate_table = Arc::new(RateTable::new(
        Arc::new(MemoryRateRepository(store.clone())),
        RateDefaults::from_config(&config),
    ));
    let walker = Arc::new(HierarchyWalker::new(agencies.clone()));
    let ledger = Arc::new(CommissionLedger::new(
        agencies.clone(),
        records.clone(),
        Arc::new(MemoryBonusRepository(store.clone())),
        Arc::new(MemoryLedgerRepository(store.clone())),
        Arc::new(MemoryPaymentRepository(store.clone())),
        TaxEvaluator::new(),
    ));
    let calculator = CommissionCalculator::new(rate_table, TaxEvaluator::new(), &config);
    let service = CommissionService::new(
        Arc::new(MemorySaleRepository(store.clone())),
        agencies,
        walker,
        calculator,
        records,
        ledger.clone(),
    );

    TestStack {
        store,
        service,
        ledger,
    }
}

fn period() -> Period {
    "2026-08".parse().unwrap()
}

/// seller (tier 3) -> parent (tier 2) -> grandparent (tier 1)
fn seed_three_tier_chain(store: &MemoryStore) {
    store.insert_agency(corporate_agency("grandparent", 1, None));
    store.insert_agency(corporate_agency("parent", 2, Some("grandparent")));
    store.insert_agency(corporate_agency("seller", 3, Some("parent")));
}

#[tokio::test]
async fn test_full_flow_from_sale_to_payout() {
    let stack = build_stack();
    seed_three_tier_chain(&stack.store);
    stack
        .store
        .insert_sale(confirmed_sale("sale-1", "seller", 1_000_000, "2026-08"));

    // calculation
    let set = stack.service.calculate_for_sale("sale-1").await.unwrap();

    // tier 3 -> 20% direct
    assert_eq!(set.direct.rate, dec!(20));
    assert_eq!(set.direct.gross_amount, 200_000);

    // two ancestors -> 10% and 8%
    assert_eq!(set.bonuses.len(), 2);
    assert_eq!(set.bonuses[0].benefit_agency_id, "parent");
    assert_eq!(set.bonuses[0].gross_amount, 100_000);
    assert_eq!(set.bonuses[1].benefit_agency_id, "grandparent");
    assert_eq!(set.bonuses[1].gross_amount, 80_000);

    // the seller's ledger holds the direct commission
    let entry = stack.ledger.entry("seller", period()).await.unwrap();
    assert_eq!(entry.direct_commission, 200_000);
    assert_eq!(entry.net_payment, 200_000);

    // bonus approval merges into the parent's ledger
    let bonus_id = set.bonuses[0].id.clone();
    let parent_entry = stack
        .ledger
        .on_bonus_approved(&bonus_id, "admin-1")
        .await
        .unwrap();
    assert_eq!(parent_entry.agency_id, "parent");
    assert_eq!(parent_entry.hierarchy_bonus, 100_000);
    assert_eq!(parent_entry.total_commission, 100_000);

    // payout snapshots the net payment
    let record = stack
        .ledger
        .record_payment(
            "parent",
            period(),
            NaiveDate::from_ymd_opt(2026, 9, 25).unwrap(),
            "bank_transfer",
            Some("August payout".to_string()),
        )
        .await
        .unwrap();
    assert_eq!(record.amount, 100_000);
}

#[tokio::test]
async fn test_recalculation_replaces_previous_records() {
    let stack = build_stack();
    seed_three_tier_chain(&stack.store);
    stack
        .store
        .insert_sale(confirmed_sale("sale-1", "seller", 1_000_000, "2026-08"));

    let first = stack.service.calculate_for_sale("sale-1").await.unwrap();
    let second = stack.service.calculate_for_sale("sale-1").await.unwrap();

    // deterministic ids and amounts
    assert_eq!(first.direct.id, second.direct.id);
    assert_eq!(first.direct.gross_amount, second.direct.gross_amount);

    // exactly one record set exists
    assert_eq!(stack.store.directs.lock().unwrap().len(), 1);
    assert_eq!(stack.store.bonuses_for_sale("sale-1").len(), 2);

    // the ledger was refreshed, not doubled
    let entry = stack.ledger.entry("seller", period()).await.unwrap();
    assert_eq!(entry.direct_commission, 200_000);
}

#[tokio::test]
async fn test_unconfirmed_sale_is_rejected() {
    let stack = build_stack();
    seed_three_tier_chain(&stack.store);

    let mut sale = confirmed_sale("sale-1", "seller", 100_000, "2026-08");
    sale.status = SaleStatus::Cancelled;
    stack.store.insert_sale(sale);

    let err = stack.service.calculate_for_sale("sale-1").await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_missing_sale_and_agency_are_not_found() {
    let stack = build_stack();

    let err = stack.service.calculate_for_sale("ghost").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    stack
        .store
        .insert_sale(confirmed_sale("sale-1", "nobody", 100_000, "2026-08"));
    let err = stack.service.calculate_for_sale("sale-1").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_batch_run_isolates_per_sale_failures() {
    let stack = build_stack();
    seed_three_tier_chain(&stack.store);

    stack
        .store
        .insert_sale(confirmed_sale("sale-1", "seller", 1_000_000, "2026-08"));
    stack
        .store
        .insert_sale(confirmed_sale("sale-2", "parent", 500_000, "2026-08"));
    // references an agency that does not exist
    stack
        .store
        .insert_sale(confirmed_sale("sale-broken", "ghost", 100_000, "2026-08"));
    // different period, must be ignored
    stack
        .store
        .insert_sale(confirmed_sale("sale-other-month", "seller", 100_000, "2026-09"));

    let outcome = stack.service.calculate_for_period(period()).await.unwrap();

    assert_eq!(outcome.calculated.len(), 2);
    assert!(outcome.calculated.contains(&"sale-1".to_string()));
    assert!(outcome.calculated.contains(&"sale-2".to_string()));
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].sale_id, "sale-broken");

    // both successful sellers have ledger entries
    assert_eq!(
        stack.ledger.entry("seller", period()).await.unwrap().direct_commission,
        200_000
    );
    assert_eq!(
        stack.ledger.entry("parent", period()).await.unwrap().direct_commission,
        125_000 // tier 2 -> 25% of 500,000
    );
}

#[tokio::test]
async fn test_sales_by_same_agency_accumulate_in_ledger() {
    let stack = build_stack();
    stack.store.insert_agency(individual_agency("solo", 1, None));
    stack
        .store
        .insert_sale(confirmed_sale("sale-1", "solo", 100_000, "2026-08"));
    stack
        .store
        .insert_sale(confirmed_sale("sale-2", "solo", 200_000, "2026-08"));

    stack.service.calculate_for_period(period()).await.unwrap();

    // 30% direct each: 30,000 + 60,000 = 90,000 gross
    let entry = stack.ledger.entry("solo", period()).await.unwrap();
    assert_eq!(entry.direct_commission, 90_000);
    // unregistered individual: floor(90000*0.02) = 1800,
    // floor(88200*0.1021) = 9005, net = 79,195
    assert_eq!(entry.invoice_deduction, 1_800);
    assert_eq!(entry.withholding_tax, 9_005);
    assert_eq!(entry.net_payment, 79_195);
}
