//! Expense tracking models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Expense categories, in the fixed order reports display them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Salary,
    Rent,
    Utilities,
    Supplies,
    Other,
}

impl ExpenseCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::Salary => "salary",
            ExpenseCategory::Rent => "rent",
            ExpenseCategory::Utilities => "utilities",
            ExpenseCategory::Supplies => "supplies",
            ExpenseCategory::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "salary" => Some(ExpenseCategory::Salary),
            "rent" => Some(ExpenseCategory::Rent),
            "utilities" => Some(ExpenseCategory::Utilities),
            "supplies" => Some(ExpenseCategory::Supplies),
            "other" => Some(ExpenseCategory::Other),
            _ => None,
        }
    }

    /// Report rollup order
    pub const ALL: [ExpenseCategory; 5] = [
        ExpenseCategory::Salary,
        ExpenseCategory::Rent,
        ExpenseCategory::Utilities,
        ExpenseCategory::Supplies,
        ExpenseCategory::Other,
    ];
}

/// A recorded business expense, independent of any quote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub category: ExpenseCategory,
    pub description: String,
    pub amount: Decimal,
    pub expense_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}
