//! Site settings service
//!
//! A single public-contact-details row, upserted in place. A missing row is
//! normal and reads back as the defaults.

use sqlx::{FromRow, PgPool};

use crate::error::AppResult;
use shared::models::SiteSettings;

/// Settings service
#[derive(Clone)]
pub struct SettingsService {
    db: PgPool,
}

#[derive(Debug, FromRow)]
struct SettingsRow {
    address: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    facebook_url: Option<String>,
    instagram_url: Option<String>,
    whatsapp_number: Option<String>,
}

impl SettingsRow {
    fn into_settings(self) -> SiteSettings {
        SiteSettings {
            address: self.address,
            phone: self.phone,
            email: self.email,
            facebook_url: self.facebook_url,
            instagram_url: self.instagram_url,
            whatsapp_number: self.whatsapp_number,
        }
    }
}

impl SettingsService {
    /// Create a new SettingsService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Fetch the settings row, defaulting when none has been saved yet
    pub async fn get(&self) -> AppResult<SiteSettings> {
        let row = sqlx::query_as::<_, SettingsRow>(
            r#"
            SELECT address, phone, email, facebook_url, instagram_url, whatsapp_number
            FROM site_settings
            WHERE id = 1
            "#,
        )
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(SettingsRow::into_settings).unwrap_or_default())
    }

    /// Replace the settings row, creating it on first save
    pub async fn update(&self, settings: SiteSettings) -> AppResult<SiteSettings> {
        let row = sqlx::query_as::<_, SettingsRow>(
            r#"
            INSERT INTO site_settings (id, address, phone, email, facebook_url,
                                       instagram_url, whatsapp_number, updated_at)
            VALUES (1, $1, $2, $3, $4, $5, $6, now())
            ON CONFLICT (id) DO UPDATE
            SET address = $1, phone = $2, email = $3, facebook_url = $4,
                instagram_url = $5, whatsapp_number = $6, updated_at = now()
            RETURNING address, phone, email, facebook_url, instagram_url, whatsapp_number
            "#,
        )
        .bind(&settings.address)
        .bind(&settings.phone)
        .bind(&settings.email)
        .bind(&settings.facebook_url)
        .bind(&settings.instagram_url)
        .bind(&settings.whatsapp_number)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into_settings())
    }
}
