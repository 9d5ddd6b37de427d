//! service-core: Shared infrastructure for dashboard services.
pub mod config;
pub mod error;
pub mod observability;

pub use anyhow;
pub use tracing;
