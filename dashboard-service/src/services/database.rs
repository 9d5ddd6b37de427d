//! Database service for dashboard-service.

use crate::config::DatabaseConfig;
use crate::error::StoreError;
use crate::services::metrics::DB_QUERY_DURATION;
use service_core::error::AppError;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::future::Future;
use std::time::Duration;
use tracing::{info, instrument};

/// Database connection pool wrapper.
///
/// Cloning is cheap and shares the pool. Every query issued through
/// [`Database::timed`] is bounded by `query_timeout`.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
    query_timeout: Duration,
}

impl Database {
    /// Create a new database connection pool.
    #[instrument(skip(config), fields(service = "dashboard-service"))]
    pub async fn new(config: &DatabaseConfig) -> Result<Self, AppError> {
        info!(
            max_connections = config.max_connections,
            min_connections = config.min_connections,
            ssl_mode = ?config.ssl_mode,
            "Connecting to PostgreSQL"
        );

        let options = config
            .url
            .parse::<PgConnectOptions>()
            .map_err(|e| AppError::ConfigError(anyhow::anyhow!("Invalid DATABASE_URL: {}", e)))?
            .ssl_mode(config.ssl_mode);

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect_with(options)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to connect: {}", e)))?;

        info!("PostgreSQL connection pool established");

        Ok(Self::from_pool(pool, config.query_timeout))
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: PgPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn query_timeout(&self) -> Duration {
        self.query_timeout
    }

    /// Check database health.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.timed("health_check", sqlx::query("SELECT 1").execute(&self.pool))
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Health check failed: {}", e)))?;
        Ok(())
    }

    /// Run database migrations.
    #[instrument(skip(self))]
    pub async fn run_migrations(&self) -> Result<(), AppError> {
        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Migration failed: {}", e)))?;
        info!("Database migrations completed");
        Ok(())
    }

    /// Close every pooled connection. Waits for checked-out connections to return.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("PostgreSQL connection pool closed");
    }

    /// Run one store round trip under the query timeout, recording its duration.
    pub(crate) async fn timed<T, F>(&self, operation: &'static str, query: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        let timer = DB_QUERY_DURATION
            .with_label_values(&[operation])
            .start_timer();

        let result = tokio::time::timeout(self.query_timeout, query).await;

        timer.observe_duration();

        match result {
            Ok(outcome) => outcome.map_err(StoreError::from),
            Err(_) => Err(StoreError::Timeout(self.query_timeout)),
        }
    }
}
