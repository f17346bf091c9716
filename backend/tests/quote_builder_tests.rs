//! Quote builder tests
//!
//! Covers item composition, quantity clamping, totals, and reference
//! number generation.

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

use shared::models::{generate_ref_number, DraftError, MaterialSnapshot, QuoteDraft, QuoteItem};
use shared::validation::normalize_optional;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn snapshot(name: &str, price: &str, stock: i32) -> MaterialSnapshot {
    MaterialSnapshot {
        id: Uuid::new_v4(),
        name: name.to_string(),
        selling_price: dec(price),
        stock_quantity: stock,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[test]
fn test_item_defaults_come_from_material() {
    let mut draft = QuoteDraft::default();
    let frame = snapshot("Sliding Door Frame", "75.50", 12);

    let item = draft.add_item_from_material(&frame).unwrap();
    assert_eq!(item.description, "Sliding Door Frame");
    assert_eq!(item.unit_price, dec("75.50"));
    assert_eq!(item.quantity, 1);
}

#[test]
fn test_out_of_stock_add_leaves_draft_unchanged() {
    let mut draft = QuoteDraft::default();
    draft.add_custom_item();

    let hinge = snapshot("Hinge", "3", 0);
    let err = draft.add_item_from_material(&hinge).unwrap_err();

    assert_eq!(err, DraftError::OutOfStock("Hinge".to_string()));
    assert_eq!(draft.items.len(), 1);
}

#[test]
fn test_items_keep_insertion_order() {
    let mut draft = QuoteDraft::default();
    let a = snapshot("Profile A", "10", 5);
    let b = snapshot("Profile B", "20", 5);

    draft.add_item_from_material(&a).unwrap();
    draft.add_custom_item();
    draft.add_item_from_material(&b).unwrap();

    let descriptions: Vec<&str> = draft.items.iter().map(|i| i.description.as_str()).collect();
    assert_eq!(descriptions, ["Profile A", "Custom Item", "Profile B"]);
}

#[test]
fn test_remove_item_shifts_later_items() {
    let mut draft = QuoteDraft::default();
    let a = snapshot("Profile A", "10", 5);
    let b = snapshot("Profile B", "20", 5);
    draft.add_item_from_material(&a).unwrap();
    draft.add_item_from_material(&b).unwrap();

    let removed = draft.remove_item(0).unwrap();
    assert_eq!(removed.description, "Profile A");
    assert_eq!(draft.items.len(), 1);
    assert_eq!(draft.items[0].description, "Profile B");

    assert_eq!(draft.remove_item(5).unwrap_err(), DraftError::NoSuchItem(5));
}

#[test]
fn test_quantity_clamp_reports_clamping() {
    let mut draft = QuoteDraft::default();
    let glass = snapshot("Glass Panel", "40", 3);
    draft.add_item_from_material(&glass).unwrap();

    let edit = draft.set_quantity(0, 10, std::slice::from_ref(&glass)).unwrap();
    assert_eq!(edit.applied, 3);
    assert!(edit.clamped_to_stock);
    assert_eq!(draft.items[0].quantity, 3);
}

#[test]
fn test_custom_item_quantity_is_unclamped() {
    let mut draft = QuoteDraft::default();
    draft.add_custom_item();

    let edit = draft.set_quantity(0, 500, &[]).unwrap();
    assert_eq!(edit.applied, 500);
    assert!(!edit.clamped_to_stock);
}

#[test]
fn test_discount_larger_than_subtotal_goes_negative() {
    let mut draft = QuoteDraft::default();
    draft.add_custom_item();
    draft.items[0].unit_price = dec("50");
    draft.discount = dec("80");

    assert_eq!(draft.total(), dec("-30"));
}

#[test]
fn test_validate_requires_customer_name() {
    let mut draft = QuoteDraft::default();
    draft.customer_name = "   ".to_string();
    assert_eq!(draft.validate().unwrap_err(), DraftError::MissingCustomerName);

    draft.customer_name = "Ali Hassan".to_string();
    assert!(draft.validate().is_ok());
}

#[test]
fn test_ref_numbers_share_prefix() {
    let a = generate_ref_number();
    let b = generate_ref_number();
    assert!(a.starts_with("Q-"));
    assert!(b.starts_with("Q-"));
    // Same year prefix within one run
    assert_eq!(&a[..7], &b[..7]);
}

#[test]
fn test_edited_ref_number_wins_over_generated() {
    // A human-entered reference is kept (trimmed); blank input falls back
    // to a generated one.
    let edited = normalize_optional(Some(" Q-2024-999 "));
    assert_eq!(edited.as_deref(), Some("Q-2024-999"));

    let fallback = normalize_optional(Some("   ")).unwrap_or_else(generate_ref_number);
    assert!(fallback.starts_with("Q-"));
}

#[test]
fn test_saved_items_reload_in_insertion_order() {
    let mut draft = QuoteDraft::default();
    draft.add_item_from_material(&snapshot("Profile A", "10", 5)).unwrap();
    draft.add_custom_item();
    draft.add_item_from_material(&snapshot("Glass Panel", "40", 9)).unwrap();
    draft.items[2].width = Some(dec("1.2"));
    draft.items[2].notes = Some("tempered".to_string());

    // Persist shape: rows carry the draft fields plus 0..n positions.
    let quote_id = Uuid::new_v4();
    let mut rows: Vec<QuoteItem> = draft
        .items
        .iter()
        .enumerate()
        .map(|(position, item)| QuoteItem {
            id: Uuid::new_v4(),
            quote_id,
            material_id: item.material_id,
            description: item.description.clone(),
            width: item.width,
            height: item.height,
            quantity: item.quantity,
            unit_price: item.unit_price,
            section_profile: item.section_profile.clone(),
            notes: item.notes.clone(),
            position: position as i32,
        })
        .collect();

    // Storage order is not meaningful; reads sort by position.
    rows.reverse();
    rows.sort_by_key(|row| row.position);

    let descriptions: Vec<&str> = rows.iter().map(|r| r.description.as_str()).collect();
    assert_eq!(descriptions, ["Profile A", "Custom Item", "Glass Panel"]);
    for (row, item) in rows.iter().zip(&draft.items) {
        assert_eq!(row.material_id, item.material_id);
        assert_eq!(row.quantity, item.quantity);
        assert_eq!(row.unit_price, item.unit_price);
        assert_eq!(row.width, item.width);
        assert_eq!(row.notes, item.notes);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Subtotal equals the sum of quantity × unit price over all items.
    #[test]
    fn prop_subtotal_is_sum_of_line_totals(
        lines in prop::collection::vec((1i32..100, 0u32..10_000), 0..20)
    ) {
        let mut draft = QuoteDraft::default();
        for (quantity, cents) in &lines {
            draft.add_custom_item();
            let index = draft.items.len() - 1;
            draft.items[index].unit_price = Decimal::new(*cents as i64, 2);
            draft.set_quantity(index, *quantity, &[]).unwrap();
        }

        let expected: Decimal = lines
            .iter()
            .map(|(quantity, cents)| Decimal::from(*quantity) * Decimal::new(*cents as i64, 2))
            .sum();
        prop_assert_eq!(draft.subtotal(), expected);
    }

    /// A quantity edit always lands in [1, snapshot stock] for material items.
    #[test]
    fn prop_quantity_edit_respects_bounds(requested in -50i32..200, stock in 1i32..50) {
        let material = snapshot("Bar", "5", stock);
        let mut draft = QuoteDraft::default();
        draft.add_item_from_material(&material).unwrap();

        let edit = draft.set_quantity(0, requested, std::slice::from_ref(&material)).unwrap();
        prop_assert!(edit.applied >= 1);
        prop_assert!(edit.applied <= stock);
        prop_assert_eq!(edit.clamped_to_stock, requested > stock);
    }

    /// Negative discounts never raise the total above the subtotal.
    #[test]
    fn prop_total_never_exceeds_subtotal(discount in -10_000i64..10_000) {
        let mut draft = QuoteDraft::default();
        draft.add_custom_item();
        draft.items[0].unit_price = dec("100");
        draft.discount = Decimal::new(discount, 2);

        prop_assert!(draft.total() <= draft.subtotal());
    }
}
