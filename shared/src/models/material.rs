//! Inventory material models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Measurement units for inventory materials
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Pcs,
    M2,
    M,
    Kg,
    Set,
    Liter,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Pcs => "pcs",
            Unit::M2 => "m2",
            Unit::M => "m",
            Unit::Kg => "kg",
            Unit::Set => "set",
            Unit::Liter => "liter",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pcs" => Some(Unit::Pcs),
            "m2" => Some(Unit::M2),
            "m" => Some(Unit::M),
            "kg" => Some(Unit::Kg),
            "set" => Some(Unit::Set),
            "liter" => Some(Unit::Liter),
            _ => None,
        }
    }

    pub const ALL: [Unit; 6] = [Unit::Pcs, Unit::M2, Unit::M, Unit::Kg, Unit::Set, Unit::Liter];
}

/// An inventory-tracked unit with cost/selling price and on-hand quantity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub unit: Unit,
    pub cost_price: Decimal,
    pub selling_price: Decimal,
    pub stock_quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The slice of a material the quote builder needs when composing items.
///
/// Taken at editor load time; quantity clamps against it are a soft check,
/// not a live re-check against the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaterialSnapshot {
    pub id: Uuid,
    pub name: String,
    pub selling_price: Decimal,
    pub stock_quantity: i32,
}

/// Summary figures for the inventory screen
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryTotals {
    pub material_count: i64,
    /// Σ selling_price × stock_quantity
    pub total_stock_value: Decimal,
    /// Σ cost_price × stock_quantity
    pub total_cost_value: Decimal,
    pub low_stock_count: i64,
}

/// Materials at or below this on-hand quantity count as low stock.
pub const LOW_STOCK_THRESHOLD: i32 = 5;

impl InventoryTotals {
    /// Compute summary figures over (cost_price, selling_price, stock) rows.
    pub fn compute(rows: &[(Decimal, Decimal, i32)]) -> Self {
        let mut totals = InventoryTotals {
            material_count: rows.len() as i64,
            total_stock_value: Decimal::ZERO,
            total_cost_value: Decimal::ZERO,
            low_stock_count: 0,
        };
        for (cost_price, selling_price, stock) in rows {
            let qty = Decimal::from(*stock);
            totals.total_stock_value += *selling_price * qty;
            totals.total_cost_value += *cost_price * qty;
            if *stock <= LOW_STOCK_THRESHOLD {
                totals.low_stock_count += 1;
            }
        }
        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_unit_round_trip() {
        for unit in Unit::ALL {
            assert_eq!(Unit::parse(unit.as_str()), Some(unit));
        }
        assert_eq!(Unit::parse("tonne"), None);
    }

    #[test]
    fn test_inventory_totals() {
        let rows = vec![
            (dec("10"), dec("25"), 4),
            (dec("3.50"), dec("8"), 100),
        ];
        let totals = InventoryTotals::compute(&rows);
        assert_eq!(totals.material_count, 2);
        assert_eq!(totals.total_stock_value, dec("900"));
        assert_eq!(totals.total_cost_value, dec("390"));
        assert_eq!(totals.low_stock_count, 1);
    }

    #[test]
    fn test_inventory_totals_empty() {
        let totals = InventoryTotals::compute(&[]);
        assert_eq!(totals.material_count, 0);
        assert_eq!(totals.total_stock_value, Decimal::ZERO);
        assert_eq!(totals.low_stock_count, 0);
    }

    #[test]
    fn test_low_stock_boundary() {
        let rows = vec![
            (Decimal::ZERO, Decimal::ZERO, LOW_STOCK_THRESHOLD),
            (Decimal::ZERO, Decimal::ZERO, LOW_STOCK_THRESHOLD + 1),
            (Decimal::ZERO, Decimal::ZERO, 0),
        ];
        assert_eq!(InventoryTotals::compute(&rows).low_stock_count, 2);
    }
}
