//! HTTP handlers for site settings

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::services::settings::SettingsService;
use crate::AppState;
use shared::models::SiteSettings;

/// Fetch public site settings
pub async fn get_settings(State(state): State<AppState>) -> AppResult<Json<SiteSettings>> {
    let service = SettingsService::new(state.db);
    let settings = service.get().await?;
    Ok(Json(settings))
}

/// Replace site settings
pub async fn update_settings(
    State(state): State<AppState>,
    Json(settings): Json<SiteSettings>,
) -> AppResult<Json<SiteSettings>> {
    let service = SettingsService::new(state.db);
    let updated = service.update(settings).await?;
    Ok(Json(updated))
}
