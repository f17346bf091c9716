//! HTTP handlers for expense endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::expenses::{
    CreateExpenseInput, ExpenseFilter, ExpenseService, UpdateExpenseInput,
};
use crate::AppState;
use shared::models::Expense;

/// List expenses, optionally filtered by date range
pub async fn list_expenses(
    State(state): State<AppState>,
    Query(filter): Query<ExpenseFilter>,
) -> AppResult<Json<Vec<Expense>>> {
    let service = ExpenseService::new(state.db);
    let expenses = service.list(filter).await?;
    Ok(Json(expenses))
}

/// Record an expense
pub async fn create_expense(
    State(state): State<AppState>,
    Json(input): Json<CreateExpenseInput>,
) -> AppResult<Json<Expense>> {
    let service = ExpenseService::new(state.db);
    let expense = service.create(input).await?;
    Ok(Json(expense))
}

/// Update an expense
pub async fn update_expense(
    State(state): State<AppState>,
    Path(expense_id): Path<Uuid>,
    Json(input): Json<UpdateExpenseInput>,
) -> AppResult<Json<Expense>> {
    let service = ExpenseService::new(state.db);
    let expense = service.update(expense_id, input).await?;
    Ok(Json(expense))
}

/// Delete an expense
pub async fn delete_expense(
    State(state): State<AppState>,
    Path(expense_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = ExpenseService::new(state.db);
    service.delete(expense_id).await?;
    Ok(Json(()))
}
