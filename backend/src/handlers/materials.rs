//! HTTP handlers for inventory material endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::materials::{
    CreateMaterialInput, MaterialListing, MaterialService, UpdateMaterialInput,
};
use crate::AppState;
use shared::models::Material;

#[derive(Debug, Deserialize)]
pub struct MaterialQuery {
    pub search: Option<String>,
}

/// List materials with inventory summary figures
pub async fn list_materials(
    State(state): State<AppState>,
    Query(query): Query<MaterialQuery>,
) -> AppResult<Json<MaterialListing>> {
    let service = MaterialService::new(state.db);
    let listing = service.list(query.search.as_deref()).await?;
    Ok(Json(listing))
}

/// Get a single material
pub async fn get_material(
    State(state): State<AppState>,
    Path(material_id): Path<Uuid>,
) -> AppResult<Json<Material>> {
    let service = MaterialService::new(state.db);
    let material = service.get(material_id).await?;
    Ok(Json(material))
}

/// Create a material
pub async fn create_material(
    State(state): State<AppState>,
    Json(input): Json<CreateMaterialInput>,
) -> AppResult<Json<Material>> {
    let service = MaterialService::new(state.db);
    let material = service.create(input).await?;
    Ok(Json(material))
}

/// Update a material
pub async fn update_material(
    State(state): State<AppState>,
    Path(material_id): Path<Uuid>,
    Json(input): Json<UpdateMaterialInput>,
) -> AppResult<Json<Material>> {
    let service = MaterialService::new(state.db);
    let material = service.update(material_id, input).await?;
    Ok(Json(material))
}

/// Delete a material
pub async fn delete_material(
    State(state): State<AppState>,
    Path(material_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = MaterialService::new(state.db);
    service.delete(material_id).await?;
    Ok(Json(()))
}

#[derive(Debug, Deserialize)]
pub struct ImportMaterialInput {
    pub product_id: Uuid,
}

/// Seed a material from a catalog product
pub async fn import_material(
    State(state): State<AppState>,
    Json(input): Json<ImportMaterialInput>,
) -> AppResult<Json<Material>> {
    let service = MaterialService::new(state.db);
    let material = service.import_from_catalog(input.product_id).await?;
    Ok(Json(material))
}
