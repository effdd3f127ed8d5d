//! Shared request parameters and response models.

pub mod models;
pub mod params;

pub use models::*;
pub use params::*;
