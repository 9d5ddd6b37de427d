//! Services module for dashboard-service.

pub mod dashboard;
pub mod database;
pub mod metrics;
pub mod seed;

pub use database::Database;
pub use metrics::{get_metrics, init_metrics};
pub use seed::{SeedData, SeedReport, SeedUser};
