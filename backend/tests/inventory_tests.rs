//! Inventory tests
//!
//! Covers the summary figures, low-stock classification, and the catalog
//! import dedup rule.

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::models::{InventoryTotals, LOW_STOCK_THRESHOLD};
use shared::validation::is_duplicate_name;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[test]
fn test_totals_value_both_ways() {
    let rows = vec![
        (dec("4"), dec("10"), 20),
        (dec("1.25"), dec("2.75"), 8),
    ];

    let totals = InventoryTotals::compute(&rows);
    assert_eq!(totals.total_stock_value, dec("222"));
    assert_eq!(totals.total_cost_value, dec("90"));
    assert_eq!(totals.material_count, 2);
}

#[test]
fn test_low_stock_threshold_is_inclusive() {
    let rows = vec![
        (Decimal::ZERO, Decimal::ZERO, LOW_STOCK_THRESHOLD - 1),
        (Decimal::ZERO, Decimal::ZERO, LOW_STOCK_THRESHOLD),
        (Decimal::ZERO, Decimal::ZERO, LOW_STOCK_THRESHOLD + 1),
    ];
    assert_eq!(InventoryTotals::compute(&rows).low_stock_count, 2);
}

#[test]
fn test_zero_stock_counts_as_low() {
    let rows = vec![(dec("9"), dec("20"), 0)];
    let totals = InventoryTotals::compute(&rows);
    assert_eq!(totals.low_stock_count, 1);
    assert_eq!(totals.total_stock_value, Decimal::ZERO);
}

#[test]
fn test_import_dedup_is_exact_match() {
    let existing = vec![
        "Aluminum Profile 40x40".to_string(),
        "Door Handle".to_string(),
    ];

    assert!(is_duplicate_name(&existing, "Door Handle"));
    // Case and whitespace variants are distinct names.
    assert!(!is_duplicate_name(&existing, "door handle"));
    assert!(!is_duplicate_name(&existing, "Door Handle "));
    assert!(!is_duplicate_name(&existing, "Window Handle"));
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Totals scale linearly with stock: doubling every quantity doubles
    /// both value figures and preserves the material count.
    #[test]
    fn prop_totals_scale_with_stock(
        rows in prop::collection::vec(
            (0u32..10_000, 0u32..10_000, 0i32..500),
            0..20,
        ),
    ) {
        let base: Vec<(Decimal, Decimal, i32)> = rows
            .iter()
            .map(|(cost, sell, stock)| {
                (Decimal::new(*cost as i64, 2), Decimal::new(*sell as i64, 2), *stock)
            })
            .collect();
        let doubled: Vec<(Decimal, Decimal, i32)> = base
            .iter()
            .map(|(cost, sell, stock)| (*cost, *sell, stock * 2))
            .collect();

        let base_totals = InventoryTotals::compute(&base);
        let doubled_totals = InventoryTotals::compute(&doubled);

        prop_assert_eq!(
            doubled_totals.total_stock_value,
            base_totals.total_stock_value * Decimal::from(2)
        );
        prop_assert_eq!(
            doubled_totals.total_cost_value,
            base_totals.total_cost_value * Decimal::from(2)
        );
        prop_assert_eq!(doubled_totals.material_count, base_totals.material_count);
    }

    /// Low-stock count matches a direct scan of the rows.
    #[test]
    fn prop_low_stock_count_matches_scan(
        stocks in prop::collection::vec(0i32..20, 0..30),
    ) {
        let rows: Vec<(Decimal, Decimal, i32)> = stocks
            .iter()
            .map(|&stock| (Decimal::ONE, Decimal::ONE, stock))
            .collect();

        let expected = stocks.iter().filter(|&&s| s <= LOW_STOCK_THRESHOLD).count() as i64;
        prop_assert_eq!(InventoryTotals::compute(&rows).low_stock_count, expected);
    }
}
