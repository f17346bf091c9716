//! HTTP handlers for contact-form messages

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::messages::{CreateMessageInput, MessageService};
use crate::AppState;
use shared::models::Message;

/// Accept a public contact-form submission
pub async fn create_message(
    State(state): State<AppState>,
    Json(input): Json<CreateMessageInput>,
) -> AppResult<Json<Message>> {
    let service = MessageService::new(state.db);
    let message = service.create(input).await?;
    Ok(Json(message))
}

/// List inbox messages
pub async fn list_messages(State(state): State<AppState>) -> AppResult<Json<Vec<Message>>> {
    let service = MessageService::new(state.db);
    let messages = service.list().await?;
    Ok(Json(messages))
}

/// Mark a message as read
pub async fn mark_message_read(
    State(state): State<AppState>,
    Path(message_id): Path<Uuid>,
) -> AppResult<Json<Message>> {
    let service = MessageService::new(state.db);
    let message = service.mark_read(message_id).await?;
    Ok(Json(message))
}

/// Delete a message
pub async fn delete_message(
    State(state): State<AppState>,
    Path(message_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = MessageService::new(state.db);
    service.delete(message_id).await?;
    Ok(Json(()))
}
