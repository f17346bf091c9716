//! Monthly report aggregation
//!
//! A report is a pure function of a closed date interval over approved
//! quotes and expenses; nothing here mutates or caches.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ExpenseCategory;

/// The persisted aggregates a quote contributes to a report
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct QuoteTotals {
    pub total_amount: Decimal,
    pub total_cost: Decimal,
}

/// The slice of an expense a report consumes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ExpenseEntry {
    pub category: ExpenseCategory,
    pub amount: Decimal,
}

/// Per-category expense rollup; only non-empty categories are reported
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryRollup {
    pub category: ExpenseCategory,
    pub total: Decimal,
    pub count: i64,
}

/// Derived profit/loss figures for one calendar month
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyReport {
    pub total_sales: Decimal,
    pub total_cost: Decimal,
    pub gross_profit: Decimal,
    pub total_expenses: Decimal,
    pub net_profit: Decimal,
    pub by_category: Vec<CategoryRollup>,
}

impl MonthlyReport {
    /// Aggregate approved quotes and expenses into a report.
    ///
    /// Every figure is linear in the input sets, so aggregating the union
    /// of two disjoint ranges equals the sum of their separate reports.
    pub fn aggregate(quotes: &[QuoteTotals], expenses: &[ExpenseEntry]) -> Self {
        let total_sales: Decimal = quotes.iter().map(|q| q.total_amount).sum();
        let total_cost: Decimal = quotes.iter().map(|q| q.total_cost).sum();
        let total_expenses: Decimal = expenses.iter().map(|e| e.amount).sum();
        let gross_profit = total_sales - total_cost;

        let by_category = ExpenseCategory::ALL
            .iter()
            .filter_map(|&category| {
                let matching: Vec<&ExpenseEntry> =
                    expenses.iter().filter(|e| e.category == category).collect();
                if matching.is_empty() {
                    return None;
                }
                Some(CategoryRollup {
                    category,
                    total: matching.iter().map(|e| e.amount).sum(),
                    count: matching.len() as i64,
                })
            })
            .collect();

        MonthlyReport {
            total_sales,
            total_cost,
            gross_profit,
            total_expenses,
            net_profit: gross_profit - total_expenses,
            by_category,
        }
    }
}

/// First and last day of a calendar month, as a closed interval.
///
/// Returns None for months outside 1..=12.
pub fn month_range(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_month_start = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((start, next_month_start.pred_opt()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_aggregate_basic() {
        let quotes = vec![
            QuoteTotals {
                total_amount: dec("1000"),
                total_cost: dec("400"),
            },
            QuoteTotals {
                total_amount: dec("500"),
                total_cost: dec("150"),
            },
        ];
        let expenses = vec![
            ExpenseEntry {
                category: ExpenseCategory::Rent,
                amount: dec("300"),
            },
            ExpenseEntry {
                category: ExpenseCategory::Salary,
                amount: dec("200"),
            },
        ];

        let report = MonthlyReport::aggregate(&quotes, &expenses);
        assert_eq!(report.total_sales, dec("1500"));
        assert_eq!(report.total_cost, dec("550"));
        assert_eq!(report.gross_profit, dec("950"));
        assert_eq!(report.total_expenses, dec("500"));
        assert_eq!(report.net_profit, dec("450"));
    }

    #[test]
    fn test_rollups_keep_fixed_order_and_skip_empty() {
        let expenses = vec![
            ExpenseEntry {
                category: ExpenseCategory::Other,
                amount: dec("10"),
            },
            ExpenseEntry {
                category: ExpenseCategory::Salary,
                amount: dec("100"),
            },
            ExpenseEntry {
                category: ExpenseCategory::Salary,
                amount: dec("50"),
            },
        ];

        let report = MonthlyReport::aggregate(&[], &expenses);
        assert_eq!(report.by_category.len(), 2);
        assert_eq!(report.by_category[0].category, ExpenseCategory::Salary);
        assert_eq!(report.by_category[0].total, dec("150"));
        assert_eq!(report.by_category[0].count, 2);
        assert_eq!(report.by_category[1].category, ExpenseCategory::Other);
    }

    #[test]
    fn test_empty_report_is_zero() {
        let report = MonthlyReport::aggregate(&[], &[]);
        assert_eq!(report.total_sales, Decimal::ZERO);
        assert_eq!(report.net_profit, Decimal::ZERO);
        assert!(report.by_category.is_empty());
    }

    #[test]
    fn test_month_range_boundaries() {
        let (start, end) = month_range(2024, 2).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()); // leap year

        let (start, end) = month_range(2023, 12).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2023, 12, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());

        assert!(month_range(2024, 13).is_none());
        assert!(month_range(2024, 0).is_none());
    }
}
