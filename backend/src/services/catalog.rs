//! Public catalog service (products and project gallery)

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{Product, Project};

/// Catalog service
#[derive(Clone)]
pub struct CatalogService {
    db: PgPool,
}

#[derive(Debug, FromRow)]
struct ProductRow {
    id: Uuid,
    title: String,
    description: Option<String>,
    category: Option<String>,
    image_url: Option<String>,
    cost_price: Option<Decimal>,
    selling_price: Option<Decimal>,
    stock_quantity: Option<i32>,
    created_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_product(self) -> Product {
        Product {
            id: self.id,
            title: self.title,
            description: self.description,
            category: self.category,
            image_url: self.image_url,
            cost_price: self.cost_price,
            selling_price: self.selling_price,
            stock_quantity: self.stock_quantity,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct ProjectRow {
    id: Uuid,
    title: String,
    description: Option<String>,
    category: Option<String>,
    image_url: Option<String>,
    created_at: DateTime<Utc>,
}

impl ProjectRow {
    fn into_project(self) -> Project {
        Project {
            id: self.id,
            title: self.title,
            description: self.description,
            category: self.category,
            image_url: self.image_url,
            created_at: self.created_at,
        }
    }
}

/// Input for creating or updating a product
#[derive(Debug, Deserialize)]
pub struct ProductInput {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub cost_price: Option<Decimal>,
    pub selling_price: Option<Decimal>,
    pub stock_quantity: Option<i32>,
}

/// Input for creating or updating a project entry
#[derive(Debug, Deserialize)]
pub struct ProjectInput {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
}

impl CatalogService {
    /// Create a new CatalogService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List products, newest first
    pub async fn list_products(&self) -> AppResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, title, description, category, image_url, cost_price,
                   selling_price, stock_quantity, created_at
            FROM products
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(ProductRow::into_product).collect())
    }

    /// Create a product
    pub async fn create_product(&self, input: ProductInput) -> AppResult<Product> {
        let title = Self::require_title(&input.title)?;

        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            INSERT INTO products (title, description, category, image_url, cost_price,
                                  selling_price, stock_quantity)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, title, description, category, image_url, cost_price,
                      selling_price, stock_quantity, created_at
            "#,
        )
        .bind(&title)
        .bind(&input.description)
        .bind(&input.category)
        .bind(&input.image_url)
        .bind(input.cost_price)
        .bind(input.selling_price)
        .bind(input.stock_quantity)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into_product())
    }

    /// Replace a product's fields
    pub async fn update_product(&self, id: Uuid, input: ProductInput) -> AppResult<Product> {
        let title = Self::require_title(&input.title)?;

        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            UPDATE products
            SET title = $1, description = $2, category = $3, image_url = $4,
                cost_price = $5, selling_price = $6, stock_quantity = $7
            WHERE id = $8
            RETURNING id, title, description, category, image_url, cost_price,
                      selling_price, stock_quantity, created_at
            "#,
        )
        .bind(&title)
        .bind(&input.description)
        .bind(&input.category)
        .bind(&input.image_url)
        .bind(input.cost_price)
        .bind(input.selling_price)
        .bind(input.stock_quantity)
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        Ok(row.into_product())
    }

    /// Delete a product
    pub async fn delete_product(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Product".to_string()));
        }

        Ok(())
    }

    /// List project gallery entries, newest first
    pub async fn list_projects(&self) -> AppResult<Vec<Project>> {
        let rows = sqlx::query_as::<_, ProjectRow>(
            r#"
            SELECT id, title, description, category, image_url, created_at
            FROM projects
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(ProjectRow::into_project).collect())
    }

    /// Create a project gallery entry
    pub async fn create_project(&self, input: ProjectInput) -> AppResult<Project> {
        let title = Self::require_title(&input.title)?;

        let row = sqlx::query_as::<_, ProjectRow>(
            r#"
            INSERT INTO projects (title, description, category, image_url)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, description, category, image_url, created_at
            "#,
        )
        .bind(&title)
        .bind(&input.description)
        .bind(&input.category)
        .bind(&input.image_url)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into_project())
    }

    /// Replace a project entry's fields
    pub async fn update_project(&self, id: Uuid, input: ProjectInput) -> AppResult<Project> {
        let title = Self::require_title(&input.title)?;

        let row = sqlx::query_as::<_, ProjectRow>(
            r#"
            UPDATE projects
            SET title = $1, description = $2, category = $3, image_url = $4
            WHERE id = $5
            RETURNING id, title, description, category, image_url, created_at
            "#,
        )
        .bind(&title)
        .bind(&input.description)
        .bind(&input.category)
        .bind(&input.image_url)
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Project".to_string()))?;

        Ok(row.into_project())
    }

    /// Delete a project entry
    pub async fn delete_project(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Project".to_string()));
        }

        Ok(())
    }

    fn require_title(title: &str) -> AppResult<String> {
        if shared::validation::require_non_empty(title).is_err() {
            return Err(AppError::Validation {
                field: "title".to_string(),
                message: "Title is required".to_string(),
                message_ar: "العنوان مطلوب".to_string(),
            });
        }
        Ok(title.trim().to_string())
    }
}
