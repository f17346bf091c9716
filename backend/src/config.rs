//! Configuration management for the Axis Accounting Platform
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with AXIS_ prefix
//!
//! Document/print settings (company identity, currency, terms) are plain
//! configuration passed into the services that need them, never ambient
//! state.

use config::{ConfigError, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// JWT authentication configuration
    pub jwt: JwtConfig,

    /// Admin account for the single-operator login gate
    pub admin: AdminConfig,

    /// Quote/report document settings
    pub document: DocumentConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    /// Secret key for signing JWT tokens
    pub secret: String,

    /// Access token expiration in seconds
    pub access_token_expiry: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AdminConfig {
    /// Admin login email
    pub email: String,

    /// bcrypt hash of the admin password
    pub password_hash: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DocumentConfig {
    /// Company name printed on quote headers
    pub company_name: String,

    /// Tagline printed under the company name
    pub company_tagline: String,

    /// Website URL printed on documents
    pub website_url: String,

    /// Currency symbol for the primary (USD) amounts
    pub currency_symbol: String,

    /// USD -> IQD conversion rate for the secondary total line
    pub exchange_rate: Decimal,

    /// Terms & conditions block printed on every quote
    pub terms_text: String,

    /// Footer thank-you line
    pub thank_you_text: String,

    /// Whether item dimensions appear on printed documents
    pub show_dimensions: bool,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("AXIS_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("jwt.access_token_expiry", 3600)?
            .set_default("document.company_name", "AXIS")?
            .set_default("document.company_tagline", "Aluminum Fabrication & Design")?
            .set_default("document.website_url", "")?
            .set_default("document.currency_symbol", "$")?
            .set_default("document.exchange_rate", "1500")?
            .set_default("document.terms_text", "")?
            .set_default("document.thank_you_text", "Thank you for your business!")?
            .set_default("document.show_dimensions", true)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (AXIS_ prefix)
            .add_source(
                Environment::with_prefix("AXIS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}
