//! Quote/invoice models and the in-memory quote builder

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::MaterialSnapshot;

/// Lifecycle status of a quote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    Draft,
    Sent,
    Approved,
    Rejected,
    Cancelled,
}

impl QuoteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteStatus::Draft => "draft",
            QuoteStatus::Sent => "sent",
            QuoteStatus::Approved => "approved",
            QuoteStatus::Rejected => "rejected",
            QuoteStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(QuoteStatus::Draft),
            "sent" => Some(QuoteStatus::Sent),
            "approved" => Some(QuoteStatus::Approved),
            "rejected" => Some(QuoteStatus::Rejected),
            "cancelled" => Some(QuoteStatus::Cancelled),
            _ => None,
        }
    }

    /// Cancelled is terminal; any non-cancelled quote may be cancelled.
    pub fn can_cancel(&self) -> bool {
        *self != QuoteStatus::Cancelled
    }

    /// Draft and sent quotes count as pending on the dashboard.
    pub fn is_pending(&self) -> bool {
        matches!(self, QuoteStatus::Draft | QuoteStatus::Sent)
    }

    /// Whether a quote may move from this status to `next`.
    ///
    /// Staying in place is an edit, always allowed except for cancelled.
    /// Approved quotes only leave via cancellation; there is no demotion
    /// back to a pending status.
    pub fn can_transition_to(&self, next: QuoteStatus) -> bool {
        use QuoteStatus::*;
        if *self == Cancelled {
            return false;
        }
        if *self == next {
            return true;
        }
        match (*self, next) {
            (Draft, Sent | Approved | Rejected | Cancelled) => true,
            (Sent, Approved | Rejected | Cancelled) => true,
            (Approved, Cancelled) => true,
            (Rejected, Cancelled) => true,
            _ => false,
        }
    }
}

/// A customer-facing estimate/sale record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub id: Uuid,
    pub customer_name: String,
    pub project_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub quote_date: NaiveDate,
    pub ref_number: String,
    pub status: QuoteStatus,
    pub notes: Option<String>,
    pub discount: Decimal,
    pub total_amount: Decimal,
    pub total_cost: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One persisted line of a quote, owned exclusively by it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteItem {
    pub id: Uuid,
    pub quote_id: Uuid,
    /// None means a custom/free-text item
    pub material_id: Option<Uuid>,
    pub description: String,
    pub width: Option<Decimal>,
    pub height: Option<Decimal>,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub section_profile: Option<String>,
    pub notes: Option<String>,
    /// Insertion order; reads order by it so reloads are deterministic
    pub position: i32,
}

/// Errors raised by the quote builder
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("\"{0}\" is out of stock")]
    OutOfStock(String),
    #[error("no line item at index {0}")]
    NoSuchItem(usize),
    #[error("customer name is required")]
    MissingCustomerName,
}

/// Outcome of a quantity edit on a draft item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityEdit {
    /// The quantity actually applied after clamping
    pub applied: i32,
    /// True when the request exceeded the material's snapshot stock
    pub clamped_to_stock: bool,
}

/// An unsaved line item inside the builder.
///
/// Draft items carry no identifiers; rows receive fresh ids and positions
/// only on insert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DraftItem {
    pub material_id: Option<Uuid>,
    pub description: String,
    pub width: Option<Decimal>,
    pub height: Option<Decimal>,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub section_profile: Option<String>,
    pub notes: Option<String>,
}

impl DraftItem {
    pub fn line_total(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_price
    }
}

/// In-memory quote under composition: header fields plus an ordered item
/// list. Item order is insertion order, stable for display and totals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuoteDraft {
    pub customer_name: String,
    pub project_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub quote_date: Option<NaiveDate>,
    pub ref_number: Option<String>,
    pub notes: Option<String>,
    pub discount: Decimal,
    pub items: Vec<DraftItem>,
}

impl QuoteDraft {
    /// Append an item backed by an inventory material.
    ///
    /// Rejected without state change when the material is out of stock.
    pub fn add_item_from_material(
        &mut self,
        material: &MaterialSnapshot,
    ) -> Result<&DraftItem, DraftError> {
        if material.stock_quantity <= 0 {
            return Err(DraftError::OutOfStock(material.name.clone()));
        }
        self.items.push(DraftItem {
            material_id: Some(material.id),
            description: material.name.clone(),
            width: None,
            height: None,
            quantity: 1,
            unit_price: material.selling_price,
            section_profile: None,
            notes: None,
        });
        Ok(self.items.last().expect("just pushed"))
    }

    /// Append a free-text item with no material reference.
    pub fn add_custom_item(&mut self) -> &DraftItem {
        self.items.push(DraftItem {
            material_id: None,
            description: "Custom Item".to_string(),
            width: None,
            height: None,
            quantity: 1,
            unit_price: Decimal::ZERO,
            section_profile: None,
            notes: None,
        });
        self.items.last().expect("just pushed")
    }

    /// Set an item's quantity, clamped to ≥ 1 and, for material-backed
    /// items, to the snapshot stock taken at load time.
    pub fn set_quantity(
        &mut self,
        index: usize,
        requested: i32,
        materials: &[MaterialSnapshot],
    ) -> Result<QuantityEdit, DraftError> {
        let item = self
            .items
            .get_mut(index)
            .ok_or(DraftError::NoSuchItem(index))?;

        let mut applied = requested.max(1);
        let mut clamped = false;
        if let Some(material_id) = item.material_id {
            if let Some(material) = materials.iter().find(|m| m.id == material_id) {
                if applied > material.stock_quantity {
                    applied = material.stock_quantity.max(1);
                    clamped = true;
                }
            }
        }
        item.quantity = applied;
        Ok(QuantityEdit {
            applied,
            clamped_to_stock: clamped,
        })
    }

    /// Remove an item by position.
    pub fn remove_item(&mut self, index: usize) -> Result<DraftItem, DraftError> {
        if index >= self.items.len() {
            return Err(DraftError::NoSuchItem(index));
        }
        Ok(self.items.remove(index))
    }

    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(DraftItem::line_total).sum()
    }

    /// Subtotal minus discount. Negative discounts are treated as zero;
    /// a discount larger than the subtotal yields a negative total.
    pub fn total(&self) -> Decimal {
        self.subtotal() - self.discount.max(Decimal::ZERO)
    }

    /// Validate the header before any persistence attempt.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.customer_name.trim().is_empty() {
            return Err(DraftError::MissingCustomerName);
        }
        Ok(())
    }
}

/// Produce a reference number of the form `Q-<year>-<NNN>`.
///
/// Entropy comes from a fresh v4 uuid; called only when creating a quote
/// with no existing reference.
pub fn generate_ref_number() -> String {
    let year = Utc::now().year();
    let rand = (Uuid::new_v4().as_u128() % 1000) as u16;
    format!("Q-{}-{:03}", year, rand)
}

/// Dashboard statistics over the quote list.
///
/// Cancelled quotes are excluded entirely; sales and profit only count
/// approved quotes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuoteStats {
    pub total_sales: Decimal,
    pub total_profit: Decimal,
    pub pending_quotes: i64,
    pub approved_quotes: i64,
}

impl QuoteStats {
    pub fn compute(quotes: &[(QuoteStatus, Decimal, Decimal)]) -> Self {
        let mut stats = QuoteStats {
            total_sales: Decimal::ZERO,
            total_profit: Decimal::ZERO,
            pending_quotes: 0,
            approved_quotes: 0,
        };
        let mut total_cost = Decimal::ZERO;
        for (status, total_amount, quote_cost) in quotes {
            match status {
                QuoteStatus::Approved => {
                    stats.approved_quotes += 1;
                    stats.total_sales += *total_amount;
                    total_cost += *quote_cost;
                }
                s if s.is_pending() => stats.pending_quotes += 1,
                _ => {}
            }
        }
        stats.total_profit = stats.total_sales - total_cost;
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

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

    #[test]
    fn test_add_item_defaults_from_material() {
        let mut draft = QuoteDraft::default();
        let material = snapshot("Sliding Window Frame", "50", 10);
        let item = draft.add_item_from_material(&material).unwrap();
        assert_eq!(item.quantity, 1);
        assert_eq!(item.unit_price, dec("50"));
        assert_eq!(item.material_id, Some(material.id));
    }

    #[test]
    fn test_add_item_out_of_stock_rejected() {
        let mut draft = QuoteDraft::default();
        let material = snapshot("Hinge", "5", 0);
        let err = draft.add_item_from_material(&material).unwrap_err();
        assert_eq!(err, DraftError::OutOfStock("Hinge".to_string()));
        assert!(draft.items.is_empty());
    }

    #[test]
    fn test_custom_item_placeholder() {
        let mut draft = QuoteDraft::default();
        let item = draft.add_custom_item();
        assert_eq!(item.description, "Custom Item");
        assert_eq!(item.unit_price, Decimal::ZERO);
        assert!(item.material_id.is_none());
    }

    #[test]
    fn test_quantity_clamps_to_stock() {
        let mut draft = QuoteDraft::default();
        let material = snapshot("Profile Bar", "12", 7);
        draft.add_item_from_material(&material).unwrap();

        let edit = draft.set_quantity(0, 20, &[material.clone()]).unwrap();
        assert_eq!(edit.applied, 7);
        assert!(edit.clamped_to_stock);

        let edit = draft.set_quantity(0, 0, &[material]).unwrap();
        assert_eq!(edit.applied, 1);
        assert!(!edit.clamped_to_stock);
    }

    #[test]
    fn test_total_computation() {
        let mut draft = QuoteDraft::default();
        let material = snapshot("Glass Panel", "50", 10);
        draft.add_item_from_material(&material).unwrap();
        draft.set_quantity(0, 3, &[material]).unwrap();
        draft.discount = dec("10");

        assert_eq!(draft.subtotal(), dec("150"));
        assert_eq!(draft.total(), dec("140"));
    }

    #[test]
    fn test_negative_discount_treated_as_zero() {
        let mut draft = QuoteDraft::default();
        draft.add_custom_item();
        draft.items[0].unit_price = dec("100");
        draft.discount = dec("-25");
        assert_eq!(draft.total(), dec("100"));
    }

    #[test]
    fn test_ref_number_format() {
        let ref_number = generate_ref_number();
        let parts: Vec<&str> = ref_number.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "Q");
        assert_eq!(parts[1].len(), 4);
        assert_eq!(parts[2].len(), 3);
        assert!(parts[2].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_status_cancel_guard() {
        assert!(QuoteStatus::Draft.can_cancel());
        assert!(QuoteStatus::Approved.can_cancel());
        assert!(QuoteStatus::Rejected.can_cancel());
        assert!(!QuoteStatus::Cancelled.can_cancel());
    }

    #[test]
    fn test_status_transitions() {
        use QuoteStatus::*;
        assert!(Draft.can_transition_to(Sent));
        assert!(Draft.can_transition_to(Approved));
        assert!(Sent.can_transition_to(Approved));
        assert!(Approved.can_transition_to(Approved)); // edit in place
        assert!(Approved.can_transition_to(Cancelled));

        assert!(!Approved.can_transition_to(Sent));
        assert!(!Approved.can_transition_to(Draft));
        assert!(!Sent.can_transition_to(Draft));
        assert!(!Rejected.can_transition_to(Approved));
        assert!(!Cancelled.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Draft));
    }

    #[test]
    fn test_stats_exclude_cancelled() {
        let quotes = vec![
            (QuoteStatus::Approved, dec("100"), dec("40")),
            (QuoteStatus::Approved, dec("200"), dec("60")),
            (QuoteStatus::Draft, dec("999"), dec("500")),
            (QuoteStatus::Cancelled, dec("5000"), dec("1000")),
        ];
        let stats = QuoteStats::compute(&quotes);
        assert_eq!(stats.total_sales, dec("300"));
        assert_eq!(stats.total_profit, dec("200"));
        assert_eq!(stats.pending_quotes, 1);
        assert_eq!(stats.approved_quotes, 2);
    }
}
