//! Inventory material service: CRUD, search, summary figures, catalog import

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{InventoryTotals, Material, Unit};
use shared::validation::{is_duplicate_name, require_non_empty, validate_non_negative};

/// Material service for inventory management
#[derive(Clone)]
pub struct MaterialService {
    db: PgPool,
}

/// Database row for a material; unit is stored as TEXT
#[derive(Debug, FromRow)]
struct MaterialRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    unit: String,
    cost_price: Decimal,
    selling_price: Decimal,
    stock_quantity: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl MaterialRow {
    fn into_material(self) -> Material {
        Material {
            id: self.id,
            name: self.name,
            description: self.description,
            unit: Unit::parse(&self.unit).unwrap_or(Unit::Pcs),
            cost_price: self.cost_price,
            selling_price: self.selling_price,
            stock_quantity: self.stock_quantity,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Input for creating a material
#[derive(Debug, Deserialize)]
pub struct CreateMaterialInput {
    pub name: String,
    pub description: Option<String>,
    pub unit: Option<Unit>,
    pub cost_price: Option<Decimal>,
    pub selling_price: Option<Decimal>,
    pub stock_quantity: Option<i32>,
}

/// Input for updating a material; absent fields keep their value
#[derive(Debug, Deserialize)]
pub struct UpdateMaterialInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub unit: Option<Unit>,
    pub cost_price: Option<Decimal>,
    pub selling_price: Option<Decimal>,
    pub stock_quantity: Option<i32>,
}

/// Inventory listing with its summary figures
#[derive(Debug, Serialize)]
pub struct MaterialListing {
    pub materials: Vec<Material>,
    pub totals: InventoryTotals,
}

impl MaterialService {
    /// Create a new MaterialService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List materials, optionally filtered by a case-insensitive name search,
    /// together with the inventory summary figures. The totals always cover
    /// the full inventory, not the filtered slice.
    pub async fn list(&self, search: Option<&str>) -> AppResult<MaterialListing> {
        let rows = match search.map(str::trim).filter(|s| !s.is_empty()) {
            Some(term) => {
                sqlx::query_as::<_, MaterialRow>(
                    r#"
                    SELECT id, name, description, unit, cost_price, selling_price,
                           stock_quantity, created_at, updated_at
                    FROM materials
                    WHERE name ILIKE '%' || $1 || '%'
                       OR description ILIKE '%' || $1 || '%'
                    ORDER BY name
                    "#,
                )
                .bind(term)
                .fetch_all(&self.db)
                .await?
            }
            None => {
                sqlx::query_as::<_, MaterialRow>(
                    r#"
                    SELECT id, name, description, unit, cost_price, selling_price,
                           stock_quantity, created_at, updated_at
                    FROM materials
                    ORDER BY name
                    "#,
                )
                .fetch_all(&self.db)
                .await?
            }
        };

        let totals_rows = sqlx::query_as::<_, (Decimal, Decimal, i32)>(
            "SELECT cost_price, selling_price, stock_quantity FROM materials",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(MaterialListing {
            materials: rows.into_iter().map(MaterialRow::into_material).collect(),
            totals: InventoryTotals::compute(&totals_rows),
        })
    }

    /// Get a single material by id
    pub async fn get(&self, id: Uuid) -> AppResult<Material> {
        let row = sqlx::query_as::<_, MaterialRow>(
            r#"
            SELECT id, name, description, unit, cost_price, selling_price,
                   stock_quantity, created_at, updated_at
            FROM materials
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Material".to_string()))?;

        Ok(row.into_material())
    }

    /// Create a material
    pub async fn create(&self, input: CreateMaterialInput) -> AppResult<Material> {
        if require_non_empty(&input.name).is_err() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Material name is required".to_string(),
                message_ar: "اسم المادة مطلوب".to_string(),
            });
        }
        let name = input.name.trim();

        let cost_price = input.cost_price.unwrap_or(Decimal::ZERO);
        let selling_price = input.selling_price.unwrap_or(Decimal::ZERO);
        let stock_quantity = input.stock_quantity.unwrap_or(0);
        Self::validate_figures(cost_price, selling_price, stock_quantity)?;

        let unit = input.unit.unwrap_or(Unit::Pcs);

        let row = sqlx::query_as::<_, MaterialRow>(
            r#"
            INSERT INTO materials (name, description, unit, cost_price, selling_price, stock_quantity)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, description, unit, cost_price, selling_price,
                      stock_quantity, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(&input.description)
        .bind(unit.as_str())
        .bind(cost_price)
        .bind(selling_price)
        .bind(stock_quantity)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into_material())
    }

    /// Update a material; absent fields keep their current value
    pub async fn update(&self, id: Uuid, input: UpdateMaterialInput) -> AppResult<Material> {
        let existing = self.get(id).await?;

        let name = match input.name {
            Some(name) => {
                if require_non_empty(&name).is_err() {
                    return Err(AppError::Validation {
                        field: "name".to_string(),
                        message: "Material name is required".to_string(),
                        message_ar: "اسم المادة مطلوب".to_string(),
                    });
                }
                name.trim().to_string()
            }
            None => existing.name,
        };
        let description = input.description.or(existing.description);
        let unit = input.unit.unwrap_or(existing.unit);
        let cost_price = input.cost_price.unwrap_or(existing.cost_price);
        let selling_price = input.selling_price.unwrap_or(existing.selling_price);
        let stock_quantity = input.stock_quantity.unwrap_or(existing.stock_quantity);
        Self::validate_figures(cost_price, selling_price, stock_quantity)?;

        let row = sqlx::query_as::<_, MaterialRow>(
            r#"
            UPDATE materials
            SET name = $1, description = $2, unit = $3, cost_price = $4,
                selling_price = $5, stock_quantity = $6, updated_at = now()
            WHERE id = $7
            RETURNING id, name, description, unit, cost_price, selling_price,
                      stock_quantity, created_at, updated_at
            "#,
        )
        .bind(&name)
        .bind(&description)
        .bind(unit.as_str())
        .bind(cost_price)
        .bind(selling_price)
        .bind(stock_quantity)
        .bind(id)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into_material())
    }

    /// Delete a material. Quote items that referenced it keep their line data;
    /// the foreign key only nulls the reference.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM materials WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Material".to_string()));
        }

        Ok(())
    }

    /// Seed a material from a catalog product.
    ///
    /// A product whose exact title already exists as a material name is
    /// rejected; otherwise the material carries whatever prices/stock the
    /// product row has, zeroed when absent.
    pub async fn import_from_catalog(&self, product_id: Uuid) -> AppResult<Material> {
        let product = sqlx::query_as::<_, (String, Option<String>, Option<Decimal>, Option<Decimal>, Option<i32>)>(
            "SELECT title, description, cost_price, selling_price, stock_quantity FROM products WHERE id = $1",
        )
        .bind(product_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        let (title, description, cost_price, selling_price, stock_quantity) = product;

        let existing_names = sqlx::query_scalar::<_, String>("SELECT name FROM materials")
            .fetch_all(&self.db)
            .await?;
        if is_duplicate_name(&existing_names, &title) {
            return Err(AppError::Conflict {
                resource: "material".to_string(),
                message: format!("A material named \"{}\" already exists", title),
                message_ar: format!("توجد مادة باسم \"{}\" مسبقاً", title),
            });
        }

        let row = sqlx::query_as::<_, MaterialRow>(
            r#"
            INSERT INTO materials (name, description, unit, cost_price, selling_price, stock_quantity)
            VALUES ($1, $2, 'pcs', $3, $4, $5)
            RETURNING id, name, description, unit, cost_price, selling_price,
                      stock_quantity, created_at, updated_at
            "#,
        )
        .bind(&title)
        .bind(&description)
        .bind(cost_price.unwrap_or(Decimal::ZERO))
        .bind(selling_price.unwrap_or(Decimal::ZERO))
        .bind(stock_quantity.unwrap_or(0))
        .fetch_one(&self.db)
        .await?;

        Ok(row.into_material())
    }

    fn validate_figures(
        cost_price: Decimal,
        selling_price: Decimal,
        stock_quantity: i32,
    ) -> AppResult<()> {
        if validate_non_negative(cost_price).is_err() {
            return Err(AppError::Validation {
                field: "cost_price".to_string(),
                message: "Cost price cannot be negative".to_string(),
                message_ar: "سعر التكلفة لا يمكن أن يكون سالباً".to_string(),
            });
        }
        if validate_non_negative(selling_price).is_err() {
            return Err(AppError::Validation {
                field: "selling_price".to_string(),
                message: "Selling price cannot be negative".to_string(),
                message_ar: "سعر البيع لا يمكن أن يكون سالباً".to_string(),
            });
        }
        if stock_quantity < 0 {
            return Err(AppError::Validation {
                field: "stock_quantity".to_string(),
                message: "Stock quantity cannot be negative".to_string(),
                message_ar: "الكمية المتوفرة لا يمكن أن تكون سالبة".to_string(),
            });
        }
        Ok(())
    }
}
