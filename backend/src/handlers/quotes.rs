//! HTTP handlers for quote endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::quotes::{
    DeleteGroup, QuoteDetail, QuoteListing, QuoteService, SaveQuoteInput,
};
use crate::AppState;
use shared::models::Quote;

/// List quotes with dashboard statistics
pub async fn list_quotes(State(state): State<AppState>) -> AppResult<Json<QuoteListing>> {
    let service = QuoteService::new(state.db);
    let listing = service.list().await?;
    Ok(Json(listing))
}

/// Get a quote with its items
pub async fn get_quote(
    State(state): State<AppState>,
    Path(quote_id): Path<Uuid>,
) -> AppResult<Json<QuoteDetail>> {
    let service = QuoteService::new(state.db);
    let detail = service.get(quote_id).await?;
    Ok(Json(detail))
}

/// Save a quote (create or replace)
pub async fn save_quote(
    State(state): State<AppState>,
    Json(input): Json<SaveQuoteInput>,
) -> AppResult<Json<QuoteDetail>> {
    let service = QuoteService::new(state.db);
    let detail = service.save(input).await?;
    Ok(Json(detail))
}

#[derive(Debug, Deserialize)]
pub struct CancelByRefInput {
    pub ref_number: String,
}

/// Cancel a quote by barcode reference number
pub async fn cancel_quote_by_ref(
    State(state): State<AppState>,
    Json(input): Json<CancelByRefInput>,
) -> AppResult<Json<Quote>> {
    let service = QuoteService::new(state.db);
    let quote = service.cancel_by_ref(&input.ref_number).await?;
    Ok(Json(quote))
}

/// Delete a quote
pub async fn delete_quote(
    State(state): State<AppState>,
    Path(quote_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = QuoteService::new(state.db);
    service.delete(quote_id).await?;
    Ok(Json(()))
}

#[derive(Debug, Deserialize)]
pub struct DeleteGroupInput {
    pub group: DeleteGroup,
}

/// Bulk delete quotes by lifecycle group
pub async fn delete_quote_group(
    State(state): State<AppState>,
    Json(input): Json<DeleteGroupInput>,
) -> AppResult<Json<Value>> {
    let service = QuoteService::new(state.db);
    let deleted = service.delete_group(input.group).await?;
    Ok(Json(json!({ "deleted": deleted })))
}
