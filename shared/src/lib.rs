//! Shared types and models for the Axis accounting platform
//!
//! This crate contains the domain models, quote-builder arithmetic and
//! validation helpers shared between the backend server and its test
//! suites. It is deliberately free of database dependencies.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
