//! Monthly profit/loss reporting and CSV export
//!
//! The service only fetches the month's rows; all derivation lives in the
//! shared aggregation so it stays testable without a database.

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use shared::models::{month_range, ExpenseCategory, ExpenseEntry, MonthlyReport, QuoteTotals};
use shared::types::DualAmount;

/// Reporting service
#[derive(Clone)]
pub struct ReportService {
    db: PgPool,
    exchange_rate: Decimal,
}

/// A monthly report with its period and the net figure in both currencies
#[derive(Debug, Serialize)]
pub struct MonthlyReportDetail {
    pub year: i32,
    pub month: u32,
    #[serde(flatten)]
    pub report: MonthlyReport,
    pub net_profit_dual: DualAmount,
}

impl ReportService {
    /// Create a new ReportService instance
    pub fn new(db: PgPool, exchange_rate: Decimal) -> Self {
        Self { db, exchange_rate }
    }

    /// Build the profit/loss report for one calendar month.
    ///
    /// Only approved quotes count toward sales; expenses are taken by their
    /// expense date. Both use the closed first-to-last-day interval.
    pub async fn monthly(&self, year: i32, month: u32) -> AppResult<MonthlyReportDetail> {
        let (start, end) = month_range(year, month)
            .ok_or_else(|| AppError::ValidationError(format!("Invalid month: {}", month)))?;

        let quote_rows = sqlx::query_as::<_, (Decimal, Decimal)>(
            r#"
            SELECT total_amount, total_cost
            FROM quotes
            WHERE status = 'approved' AND quote_date BETWEEN $1 AND $2
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.db)
        .await?;

        let expense_rows = sqlx::query_as::<_, (String, Decimal)>(
            "SELECT category, amount FROM expenses WHERE expense_date BETWEEN $1 AND $2",
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.db)
        .await?;

        let quotes: Vec<QuoteTotals> = quote_rows
            .into_iter()
            .map(|(total_amount, total_cost)| QuoteTotals {
                total_amount,
                total_cost,
            })
            .collect();
        let expenses: Vec<ExpenseEntry> = expense_rows
            .into_iter()
            .map(|(category, amount)| ExpenseEntry {
                category: ExpenseCategory::parse(&category).unwrap_or(ExpenseCategory::Other),
                amount,
            })
            .collect();

        let report = MonthlyReport::aggregate(&quotes, &expenses);
        let net_profit_dual = DualAmount::from_usd(report.net_profit, self.exchange_rate);

        Ok(MonthlyReportDetail {
            year,
            month,
            report,
            net_profit_dual,
        })
    }

    /// Export a monthly report as CSV
    pub async fn export_monthly_csv(&self, year: i32, month: u32) -> AppResult<Vec<u8>> {
        let detail = self.monthly(year, month).await?;
        let report = &detail.report;

        let mut writer = csv::Writer::from_writer(vec![]);

        writer
            .write_record(["Metric", "Amount"])
            .map_err(|e| AppError::Internal(format!("CSV write failed: {}", e)))?;

        let summary_rows = [
            ("Total Sales", report.total_sales),
            ("Total Cost", report.total_cost),
            ("Gross Profit", report.gross_profit),
            ("Total Expenses", report.total_expenses),
            ("Net Profit", report.net_profit),
        ];
        for (label, amount) in summary_rows {
            writer
                .write_record([label, &amount.to_string()])
                .map_err(|e| AppError::Internal(format!("CSV write failed: {}", e)))?;
        }

        writer
            .write_record(["", ""])
            .map_err(|e| AppError::Internal(format!("CSV write failed: {}", e)))?;
        writer
            .write_record(["Expense Category", "Total"])
            .map_err(|e| AppError::Internal(format!("CSV write failed: {}", e)))?;
        for rollup in &report.by_category {
            writer
                .write_record([rollup.category.as_str(), &rollup.total.to_string()])
                .map_err(|e| AppError::Internal(format!("CSV write failed: {}", e)))?;
        }

        writer
            .into_inner()
            .map_err(|e| AppError::Internal(format!("CSV finalization failed: {}", e)))
    }
}
