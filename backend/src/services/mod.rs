//! Business logic services

pub mod auth;
pub mod catalog;
pub mod expenses;
pub mod materials;
pub mod messages;
pub mod quotes;
pub mod reports;
pub mod settings;
