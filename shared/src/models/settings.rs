//! Site settings model
//!
//! A single row of public contact details. An absent row is a normal
//! outcome and yields the defaults below.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SiteSettings {
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub facebook_url: Option<String>,
    pub instagram_url: Option<String>,
    pub whatsapp_number: Option<String>,
}
