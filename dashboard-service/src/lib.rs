//! Dashboard Service - Data access for the invoice dashboard.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use error::DataFetchError;
pub use services::Database;
