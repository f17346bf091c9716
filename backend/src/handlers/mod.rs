//! HTTP request handlers

pub mod auth;
pub mod catalog;
pub mod expenses;
pub mod health;
pub mod materials;
pub mod messages;
pub mod quotes;
pub mod reports;
pub mod settings;

pub use auth::*;
pub use catalog::*;
pub use expenses::*;
pub use health::*;
pub use materials::*;
pub use messages::*;
pub use quotes::*;
pub use reports::*;
pub use settings::*;
