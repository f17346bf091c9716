//! Quote service: persistence, lifecycle transitions, and stock reconciliation
//!
//! Approved quotes hold inventory. Every path that moves a quote into or out
//! of the approved state adjusts material stock inside the same database
//! transaction as the status change, so a failure anywhere rolls back both.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{generate_ref_number, DraftItem, Quote, QuoteItem, QuoteStats, QuoteStatus};
use shared::validation::{normalize_optional, require_non_empty};

/// Quote service
#[derive(Clone)]
pub struct QuoteService {
    db: PgPool,
}

/// Database row for a quote; status is stored as TEXT
#[derive(Debug, FromRow)]
struct QuoteRow {
    id: Uuid,
    customer_name: String,
    project_name: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    quote_date: NaiveDate,
    ref_number: String,
    status: String,
    notes: Option<String>,
    discount: Decimal,
    total_amount: Decimal,
    total_cost: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl QuoteRow {
    fn into_quote(self) -> Quote {
        Quote {
            id: self.id,
            customer_name: self.customer_name,
            project_name: self.project_name,
            phone: self.phone,
            email: self.email,
            quote_date: self.quote_date,
            ref_number: self.ref_number,
            status: QuoteStatus::parse(&self.status).unwrap_or(QuoteStatus::Draft),
            notes: self.notes,
            discount: self.discount,
            total_amount: self.total_amount,
            total_cost: self.total_cost,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct QuoteItemRow {
    id: Uuid,
    quote_id: Uuid,
    material_id: Option<Uuid>,
    description: String,
    width: Option<Decimal>,
    height: Option<Decimal>,
    quantity: i32,
    unit_price: Decimal,
    section_profile: Option<String>,
    notes: Option<String>,
    position: i32,
}

impl QuoteItemRow {
    fn into_item(self) -> QuoteItem {
        QuoteItem {
            id: self.id,
            quote_id: self.quote_id,
            material_id: self.material_id,
            description: self.description,
            width: self.width,
            height: self.height,
            quantity: self.quantity,
            unit_price: self.unit_price,
            section_profile: self.section_profile,
            notes: self.notes,
            position: self.position,
        }
    }
}

/// Input for saving a quote (create when `id` is absent, replace otherwise)
#[derive(Debug, Deserialize)]
pub struct SaveQuoteInput {
    pub id: Option<Uuid>,
    pub customer_name: String,
    pub project_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub quote_date: Option<NaiveDate>,
    pub ref_number: Option<String>,
    pub status: QuoteStatus,
    pub notes: Option<String>,
    pub discount: Option<Decimal>,
    pub items: Vec<DraftItem>,
}

/// A quote with its ordered line items
#[derive(Debug, Serialize)]
pub struct QuoteDetail {
    #[serde(flatten)]
    pub quote: Quote,
    pub items: Vec<QuoteItem>,
}

/// Quote listing with dashboard statistics
#[derive(Debug, Serialize)]
pub struct QuoteListing {
    pub quotes: Vec<Quote>,
    pub stats: QuoteStats,
}

/// Which quotes a bulk delete targets
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteGroup {
    /// Drafts and sent quotes
    Pending,
    Cancelled,
}

const QUOTE_COLUMNS: &str = "id, customer_name, project_name, phone, email, quote_date, \
     ref_number, status, notes, discount, total_amount, total_cost, created_at, updated_at";

impl QuoteService {
    /// Create a new QuoteService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all quotes, newest first, with dashboard statistics
    pub async fn list(&self) -> AppResult<QuoteListing> {
        let rows = sqlx::query_as::<_, QuoteRow>(&format!(
            "SELECT {} FROM quotes ORDER BY created_at DESC",
            QUOTE_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        let quotes: Vec<Quote> = rows.into_iter().map(QuoteRow::into_quote).collect();
        let stat_rows: Vec<(QuoteStatus, Decimal, Decimal)> = quotes
            .iter()
            .map(|q| (q.status, q.total_amount, q.total_cost))
            .collect();

        Ok(QuoteListing {
            stats: QuoteStats::compute(&stat_rows),
            quotes,
        })
    }

    /// Get a quote with its items, ordered by position
    pub async fn get(&self, id: Uuid) -> AppResult<QuoteDetail> {
        let row = sqlx::query_as::<_, QuoteRow>(&format!(
            "SELECT {} FROM quotes WHERE id = $1",
            QUOTE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Quote".to_string()))?;

        let items = sqlx::query_as::<_, QuoteItemRow>(
            r#"
            SELECT id, quote_id, material_id, description, width, height, quantity,
                   unit_price, section_profile, notes, position
            FROM quote_items
            WHERE quote_id = $1
            ORDER BY position
            "#,
        )
        .bind(id)
        .fetch_all(&self.db)
        .await?;

        Ok(QuoteDetail {
            quote: row.into_quote(),
            items: items.into_iter().map(QuoteItemRow::into_item).collect(),
        })
    }

    /// Save a quote: insert on first save, otherwise replace the header and
    /// the full item list. Runs in a single transaction that also settles
    /// stock when the quote enters or leaves the approved state.
    pub async fn save(&self, input: SaveQuoteInput) -> AppResult<QuoteDetail> {
        if require_non_empty(&input.customer_name).is_err() {
            return Err(AppError::Validation {
                field: "customer_name".to_string(),
                message: "Customer name is required".to_string(),
                message_ar: "اسم الزبون مطلوب".to_string(),
            });
        }
        let customer_name = input.customer_name.trim().to_string();
        for item in &input.items {
            if item.quantity < 1 {
                return Err(AppError::Validation {
                    field: "items".to_string(),
                    message: "Item quantity must be at least 1".to_string(),
                    message_ar: "كمية البند يجب أن تكون 1 على الأقل".to_string(),
                });
            }
        }
        // Cancellation always goes through cancel_by_ref so the stock credit
        // and the idempotency guard cannot be bypassed.
        if input.status == QuoteStatus::Cancelled {
            return Err(AppError::InvalidStateTransition(
                "Quotes are cancelled through the cancellation endpoint".to_string(),
            ));
        }

        let discount = input.discount.unwrap_or(Decimal::ZERO).max(Decimal::ZERO);
        let subtotal: Decimal = input.items.iter().map(DraftItem::line_total).sum();
        let total_amount = subtotal - discount;
        let quote_date = input.quote_date.unwrap_or_else(|| Utc::now().date_naive());
        // Human-edited reference number; blank means keep (update) or
        // generate (insert).
        let requested_ref = normalize_optional(input.ref_number.as_deref());

        let mut tx = self.db.begin().await?;

        let total_cost = Self::compute_total_cost(&mut tx, &input.items).await?;

        let quote_id = match input.id {
            Some(id) => {
                let previous = sqlx::query_as::<_, (String,)>(
                    "SELECT status FROM quotes WHERE id = $1 FOR UPDATE",
                )
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| AppError::NotFound("Quote".to_string()))?;

                let previous_status =
                    QuoteStatus::parse(&previous.0).unwrap_or(QuoteStatus::Draft);
                if !previous_status.can_transition_to(input.status) {
                    return Err(AppError::InvalidStateTransition(format!(
                        "Cannot move a {} quote to {}",
                        previous_status.as_str(),
                        input.status.as_str()
                    )));
                }

                // Return stock held by the previous revision before the item
                // list is replaced.
                if previous_status == QuoteStatus::Approved {
                    Self::credit_items(&mut tx, id).await?;
                }

                sqlx::query(
                    r#"
                    UPDATE quotes
                    SET customer_name = $1, project_name = $2, phone = $3, email = $4,
                        quote_date = $5, ref_number = COALESCE($6, ref_number), status = $7,
                        notes = $8, discount = $9, total_amount = $10, total_cost = $11,
                        updated_at = now()
                    WHERE id = $12
                    "#,
                )
                .bind(&customer_name)
                .bind(&input.project_name)
                .bind(&input.phone)
                .bind(&input.email)
                .bind(quote_date)
                .bind(&requested_ref)
                .bind(input.status.as_str())
                .bind(&input.notes)
                .bind(discount)
                .bind(total_amount)
                .bind(total_cost)
                .bind(id)
                .execute(&mut *tx)
                .await?;

                sqlx::query("DELETE FROM quote_items WHERE quote_id = $1")
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;

                id
            }
            None => {
                let ref_number = requested_ref.clone().unwrap_or_else(generate_ref_number);

                sqlx::query_scalar::<_, Uuid>(
                    r#"
                    INSERT INTO quotes (customer_name, project_name, phone, email, quote_date,
                                        ref_number, status, notes, discount, total_amount, total_cost)
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                    RETURNING id
                    "#,
                )
                .bind(&customer_name)
                .bind(&input.project_name)
                .bind(&input.phone)
                .bind(&input.email)
                .bind(quote_date)
                .bind(&ref_number)
                .bind(input.status.as_str())
                .bind(&input.notes)
                .bind(discount)
                .bind(total_amount)
                .bind(total_cost)
                .fetch_one(&mut *tx)
                .await?
            }
        };

        for (position, item) in input.items.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO quote_items (quote_id, material_id, description, width, height,
                                         quantity, unit_price, section_profile, notes, position)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                "#,
            )
            .bind(quote_id)
            .bind(item.material_id)
            .bind(&item.description)
            .bind(item.width)
            .bind(item.height)
            .bind(item.quantity)
            .bind(item.unit_price)
            .bind(&item.section_profile)
            .bind(&item.notes)
            .bind(position as i32)
            .execute(&mut *tx)
            .await?;
        }

        // Approved quotes hold stock; debit it against the new item list.
        if input.status == QuoteStatus::Approved {
            Self::debit_items(&mut tx, &input.items).await?;
        }

        tx.commit().await?;

        self.get(quote_id).await
    }

    /// Cancel a quote by its barcode reference number.
    ///
    /// Idempotency guard: a quote that is already cancelled is reported as
    /// such instead of being credited twice. Stock is only returned when the
    /// quote was approved, since no other status holds stock.
    pub async fn cancel_by_ref(&self, ref_number: &str) -> AppResult<Quote> {
        let ref_number = ref_number.trim();
        if ref_number.is_empty() {
            return Err(AppError::ValidationError(
                "Reference number is required".to_string(),
            ));
        }

        let mut tx = self.db.begin().await?;

        let row = sqlx::query_as::<_, (Uuid, String)>(
            "SELECT id, status FROM quotes WHERE ref_number = $1 FOR UPDATE",
        )
        .bind(ref_number)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Quote {}", ref_number)))?;

        let (id, status) = row;
        let status = QuoteStatus::parse(&status).unwrap_or(QuoteStatus::Draft);

        if status == QuoteStatus::Cancelled {
            return Err(AppError::QuoteAlreadyCancelled(ref_number.to_string()));
        }

        if status == QuoteStatus::Approved {
            Self::credit_items(&mut tx, id).await?;
        }

        let row = sqlx::query_as::<_, QuoteRow>(&format!(
            "UPDATE quotes SET status = 'cancelled', updated_at = now() WHERE id = $1 RETURNING {}",
            QUOTE_COLUMNS
        ))
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row.into_quote())
    }

    /// Delete a quote. An approved quote releases its stock first, in the
    /// same transaction as the delete.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let status = sqlx::query_scalar::<_, String>(
            "SELECT status FROM quotes WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Quote".to_string()))?;

        if QuoteStatus::parse(&status) == Some(QuoteStatus::Approved) {
            Self::credit_items(&mut tx, id).await?;
        }

        sqlx::query("DELETE FROM quotes WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    /// Bulk delete quotes by lifecycle group. Neither group holds stock, so
    /// no reconciliation is needed.
    pub async fn delete_group(&self, group: DeleteGroup) -> AppResult<u64> {
        let result = match group {
            DeleteGroup::Pending => {
                sqlx::query("DELETE FROM quotes WHERE status IN ('draft', 'sent')")
                    .execute(&self.db)
                    .await?
            }
            DeleteGroup::Cancelled => {
                sqlx::query("DELETE FROM quotes WHERE status = 'cancelled'")
                    .execute(&self.db)
                    .await?
            }
        };

        Ok(result.rows_affected())
    }

    /// Quote cost basis: Σ quantity × material cost price over material-backed
    /// items. Custom items contribute nothing.
    async fn compute_total_cost(
        tx: &mut Transaction<'_, Postgres>,
        items: &[DraftItem],
    ) -> AppResult<Decimal> {
        let mut total_cost = Decimal::ZERO;
        for item in items {
            if let Some(material_id) = item.material_id {
                let cost_price = sqlx::query_scalar::<_, Decimal>(
                    "SELECT cost_price FROM materials WHERE id = $1",
                )
                .bind(material_id)
                .fetch_optional(&mut **tx)
                .await?
                .unwrap_or(Decimal::ZERO);
                total_cost += cost_price * Decimal::from(item.quantity);
            }
        }
        Ok(total_cost)
    }

    /// Debit stock for each material-backed item. The guarded UPDATE keeps
    /// stock non-negative; a miss means insufficient stock and aborts the
    /// enclosing transaction.
    async fn debit_items(
        tx: &mut Transaction<'_, Postgres>,
        items: &[DraftItem],
    ) -> AppResult<()> {
        for item in items {
            let Some(material_id) = item.material_id else {
                continue;
            };
            let result = sqlx::query(
                r#"
                UPDATE materials
                SET stock_quantity = stock_quantity - $1, updated_at = now()
                WHERE id = $2 AND stock_quantity >= $1
                "#,
            )
            .bind(item.quantity)
            .bind(material_id)
            .execute(&mut **tx)
            .await?;

            if result.rows_affected() == 0 {
                let on_hand = sqlx::query_scalar::<_, i32>(
                    "SELECT stock_quantity FROM materials WHERE id = $1",
                )
                .bind(material_id)
                .fetch_optional(&mut **tx)
                .await?
                .unwrap_or(0);

                if on_hand == 0 {
                    return Err(AppError::OutOfStock(item.description.clone()));
                }
                return Err(AppError::InsufficientStock(format!(
                    "Only {} of \"{}\" in stock, requested {}",
                    on_hand, item.description, item.quantity
                )));
            }
        }
        Ok(())
    }

    /// Return stock for each persisted material-backed item of a quote.
    /// Items whose material was deleted are skipped.
    async fn credit_items(tx: &mut Transaction<'_, Postgres>, quote_id: Uuid) -> AppResult<()> {
        let items = sqlx::query_as::<_, (Uuid, i32)>(
            "SELECT material_id, quantity FROM quote_items WHERE quote_id = $1 AND material_id IS NOT NULL",
        )
        .bind(quote_id)
        .fetch_all(&mut **tx)
        .await?;

        for (material_id, quantity) in items {
            sqlx::query(
                r#"
                UPDATE materials
                SET stock_quantity = stock_quantity + $1, updated_at = now()
                WHERE id = $2
                "#,
            )
            .bind(quantity)
            .bind(material_id)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }
}
