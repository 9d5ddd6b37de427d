//! Common test utilities for dashboard-service integration tests.

#![allow(dead_code)]

use dashboard_service::config::DatabaseConfig;
use dashboard_service::services::{Database, SeedData};
use sqlx::postgres::PgSslMode;
use std::sync::Once;
use std::time::Duration;

static INIT: Once = Once::new();

/// Initialize tracing for tests (only once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("info,dashboard_service=debug,sqlx=warn")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Connect to `TEST_DATABASE_URL`, apply migrations and empty every table.
///
/// Returns `None` when `TEST_DATABASE_URL` is unset so the calling test can
/// return early on machines without PostgreSQL.
pub async fn fresh_database() -> Option<Database> {
    init_tracing();

    let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
        eprintln!("TEST_DATABASE_URL is not set - skipping database test");
        return None;
    };

    let ssl_mode = std::env::var("TEST_DATABASE_SSL_MODE")
        .ok()
        .and_then(|mode| mode.parse().ok())
        .unwrap_or(PgSslMode::Prefer);

    let config = DatabaseConfig {
        url,
        max_connections: 4,
        min_connections: 1,
        ssl_mode,
        query_timeout: Duration::from_secs(10),
    };

    let db = Database::new(&config)
        .await
        .expect("Failed to connect to test database");
    db.run_migrations()
        .await
        .expect("Failed to run migrations");

    sqlx::query("TRUNCATE TABLE invoices, customers, users, revenue")
        .execute(db.pool())
        .await
        .expect("Failed to reset tables");

    Some(db)
}

/// [`fresh_database`] loaded with the sample dataset.
pub async fn seeded_database() -> Option<Database> {
    let db = fresh_database().await?;
    db.seed(&SeedData::sample())
        .await
        .expect("Failed to seed sample data");
    Some(db)
}

/// Count rows of `table`.
pub async fn row_count(db: &Database, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(db.pool())
        .await
        .expect("Failed to count rows")
}
