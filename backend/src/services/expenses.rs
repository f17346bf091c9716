//! Expense tracking service

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{Expense, ExpenseCategory};
use shared::validation::{require_non_empty, validate_positive};

/// Expense service
#[derive(Clone)]
pub struct ExpenseService {
    db: PgPool,
}

#[derive(Debug, FromRow)]
struct ExpenseRow {
    id: Uuid,
    category: String,
    description: String,
    amount: Decimal,
    expense_date: NaiveDate,
    created_at: DateTime<Utc>,
}

impl ExpenseRow {
    fn into_expense(self) -> Expense {
        Expense {
            id: self.id,
            category: ExpenseCategory::parse(&self.category).unwrap_or(ExpenseCategory::Other),
            description: self.description,
            amount: self.amount,
            expense_date: self.expense_date,
            created_at: self.created_at,
        }
    }
}

/// Input for recording an expense
#[derive(Debug, Deserialize)]
pub struct CreateExpenseInput {
    pub category: ExpenseCategory,
    pub description: String,
    pub amount: Decimal,
    pub expense_date: Option<NaiveDate>,
}

/// Input for updating an expense; absent fields keep their value
#[derive(Debug, Deserialize)]
pub struct UpdateExpenseInput {
    pub category: Option<ExpenseCategory>,
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    pub expense_date: Option<NaiveDate>,
}

/// Optional date-range filter for listings
#[derive(Debug, Deserialize)]
pub struct ExpenseFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl ExpenseService {
    /// Create a new ExpenseService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List expenses, newest first, optionally bounded by a closed date range
    pub async fn list(&self, filter: ExpenseFilter) -> AppResult<Vec<Expense>> {
        let rows = sqlx::query_as::<_, ExpenseRow>(
            r#"
            SELECT id, category, description, amount, expense_date, created_at
            FROM expenses
            WHERE ($1::date IS NULL OR expense_date >= $1)
              AND ($2::date IS NULL OR expense_date <= $2)
            ORDER BY expense_date DESC, created_at DESC
            "#,
        )
        .bind(filter.from)
        .bind(filter.to)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(ExpenseRow::into_expense).collect())
    }

    /// Record an expense
    pub async fn create(&self, input: CreateExpenseInput) -> AppResult<Expense> {
        if require_non_empty(&input.description).is_err() {
            return Err(AppError::Validation {
                field: "description".to_string(),
                message: "Expense description is required".to_string(),
                message_ar: "وصف المصروف مطلوب".to_string(),
            });
        }
        let description = input.description.trim();
        Self::validate_amount(input.amount)?;

        let expense_date = input.expense_date.unwrap_or_else(|| Utc::now().date_naive());

        let row = sqlx::query_as::<_, ExpenseRow>(
            r#"
            INSERT INTO expenses (category, description, amount, expense_date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, category, description, amount, expense_date, created_at
            "#,
        )
        .bind(input.category.as_str())
        .bind(description)
        .bind(input.amount)
        .bind(expense_date)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into_expense())
    }

    /// Update an expense; absent fields keep their current value
    pub async fn update(&self, id: Uuid, input: UpdateExpenseInput) -> AppResult<Expense> {
        let existing = sqlx::query_as::<_, ExpenseRow>(
            "SELECT id, category, description, amount, expense_date, created_at FROM expenses WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Expense".to_string()))?
        .into_expense();

        let category = input.category.unwrap_or(existing.category);
        let description = match input.description {
            Some(d) => {
                if require_non_empty(&d).is_err() {
                    return Err(AppError::Validation {
                        field: "description".to_string(),
                        message: "Expense description is required".to_string(),
                        message_ar: "وصف المصروف مطلوب".to_string(),
                    });
                }
                d.trim().to_string()
            }
            None => existing.description,
        };
        let amount = input.amount.unwrap_or(existing.amount);
        Self::validate_amount(amount)?;
        let expense_date = input.expense_date.unwrap_or(existing.expense_date);

        let row = sqlx::query_as::<_, ExpenseRow>(
            r#"
            UPDATE expenses
            SET category = $1, description = $2, amount = $3, expense_date = $4
            WHERE id = $5
            RETURNING id, category, description, amount, expense_date, created_at
            "#,
        )
        .bind(category.as_str())
        .bind(&description)
        .bind(amount)
        .bind(expense_date)
        .bind(id)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into_expense())
    }

    /// Delete an expense
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Expense".to_string()));
        }

        Ok(())
    }

    fn validate_amount(amount: Decimal) -> AppResult<()> {
        if validate_positive(amount).is_err() {
            return Err(AppError::Validation {
                field: "amount".to_string(),
                message: "Amount must be positive".to_string(),
                message_ar: "المبلغ يجب أن يكون موجباً".to_string(),
            });
        }
        Ok(())
    }
}
