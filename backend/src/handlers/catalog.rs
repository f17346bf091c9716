//! HTTP handlers for catalog endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::catalog::{CatalogService, ProductInput, ProjectInput};
use crate::AppState;
use shared::models::{Product, Project};

/// List products (public)
pub async fn list_products(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    let service = CatalogService::new(state.db);
    let products = service.list_products().await?;
    Ok(Json(products))
}

/// Create a product
pub async fn create_product(
    State(state): State<AppState>,
    Json(input): Json<ProductInput>,
) -> AppResult<Json<Product>> {
    let service = CatalogService::new(state.db);
    let product = service.create_product(input).await?;
    Ok(Json(product))
}

/// Update a product
pub async fn update_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    Json(input): Json<ProductInput>,
) -> AppResult<Json<Product>> {
    let service = CatalogService::new(state.db);
    let product = service.update_product(product_id, input).await?;
    Ok(Json(product))
}

/// Delete a product
pub async fn delete_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = CatalogService::new(state.db);
    service.delete_product(product_id).await?;
    Ok(Json(()))
}

/// List project gallery entries (public)
pub async fn list_projects(State(state): State<AppState>) -> AppResult<Json<Vec<Project>>> {
    let service = CatalogService::new(state.db);
    let projects = service.list_projects().await?;
    Ok(Json(projects))
}

/// Create a project entry
pub async fn create_project(
    State(state): State<AppState>,
    Json(input): Json<ProjectInput>,
) -> AppResult<Json<Project>> {
    let service = CatalogService::new(state.db);
    let project = service.create_project(input).await?;
    Ok(Json(project))
}

/// Update a project entry
pub async fn update_project(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
    Json(input): Json<ProjectInput>,
) -> AppResult<Json<Project>> {
    let service = CatalogService::new(state.db);
    let project = service.update_project(project_id, input).await?;
    Ok(Json(project))
}

/// Delete a project entry
pub async fn delete_project(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = CatalogService::new(state.db);
    service.delete_project(project_id).await?;
    Ok(Json(()))
}
