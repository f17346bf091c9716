//! Domain models for the Axis accounting platform

mod catalog;
mod expense;
mod material;
mod message;
mod quote;
mod report;
mod settings;

pub use catalog::*;
pub use expense::*;
pub use material::*;
pub use message::*;
pub use quote::*;
pub use report::*;
pub use settings::*;
