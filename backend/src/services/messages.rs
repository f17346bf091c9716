//! Contact-form inbox service

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::Message;
use shared::validation::{normalize_optional, require_non_empty, validate_email, validate_iraqi_phone};

/// Message service
#[derive(Clone)]
pub struct MessageService {
    db: PgPool,
}

#[derive(Debug, FromRow)]
struct MessageRow {
    id: Uuid,
    name: String,
    email: Option<String>,
    phone: Option<String>,
    body: String,
    read: bool,
    created_at: DateTime<Utc>,
}

impl MessageRow {
    fn into_message(self) -> Message {
        Message {
            id: self.id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            body: self.body,
            read: self.read,
            created_at: self.created_at,
        }
    }
}

/// Input for the public contact form
#[derive(Debug, Deserialize)]
pub struct CreateMessageInput {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub body: String,
}

const MESSAGE_COLUMNS: &str = "id, name, email, phone, body, read, created_at";

impl MessageService {
    /// Create a new MessageService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Accept a public contact-form submission
    pub async fn create(&self, input: CreateMessageInput) -> AppResult<Message> {
        if require_non_empty(&input.name).is_err() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Name is required".to_string(),
                message_ar: "الاسم مطلوب".to_string(),
            });
        }
        if require_non_empty(&input.body).is_err() {
            return Err(AppError::Validation {
                field: "body".to_string(),
                message: "Message body is required".to_string(),
                message_ar: "نص الرسالة مطلوب".to_string(),
            });
        }
        // Normalized once; the same values are validated and stored.
        let email = normalize_optional(input.email.as_deref());
        let phone = normalize_optional(input.phone.as_deref());
        if let Some(email) = email.as_deref() {
            if validate_email(email).is_err() {
                return Err(AppError::Validation {
                    field: "email".to_string(),
                    message: "Invalid email address".to_string(),
                    message_ar: "البريد الإلكتروني غير صالح".to_string(),
                });
            }
        }
        if let Some(phone) = phone.as_deref() {
            if validate_iraqi_phone(phone).is_err() {
                return Err(AppError::Validation {
                    field: "phone".to_string(),
                    message: "Invalid phone number".to_string(),
                    message_ar: "رقم الهاتف غير صالح".to_string(),
                });
            }
        }

        let row = sqlx::query_as::<_, MessageRow>(&format!(
            "INSERT INTO messages (name, email, phone, body) VALUES ($1, $2, $3, $4) RETURNING {}",
            MESSAGE_COLUMNS
        ))
        .bind(input.name.trim())
        .bind(&email)
        .bind(&phone)
        .bind(input.body.trim())
        .fetch_one(&self.db)
        .await?;

        Ok(row.into_message())
    }

    /// List messages, newest first
    pub async fn list(&self) -> AppResult<Vec<Message>> {
        let rows = sqlx::query_as::<_, MessageRow>(&format!(
            "SELECT {} FROM messages ORDER BY created_at DESC",
            MESSAGE_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(MessageRow::into_message).collect())
    }

    /// Mark a message as read
    pub async fn mark_read(&self, id: Uuid) -> AppResult<Message> {
        let row = sqlx::query_as::<_, MessageRow>(&format!(
            "UPDATE messages SET read = TRUE WHERE id = $1 RETURNING {}",
            MESSAGE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Message".to_string()))?;

        Ok(row.into_message())
    }

    /// Delete a message
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM messages WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Message".to_string()));
        }

        Ok(())
    }
}
