//! Seed entry point: loads the sample dataset into the dashboard database.

use dashboard_service::config::DashboardConfig;
use dashboard_service::services::{init_metrics, Database, SeedData, SeedReport};
use service_core::error::AppError;
use service_core::observability::{init_tracing, shutdown_tracing};
use std::process::ExitCode;

async fn run(db: &Database, config: &DashboardConfig) -> Result<SeedReport, AppError> {
    db.health_check().await?;

    if config.skip_migrations {
        tracing::info!("Skipping database migrations");
    } else {
        db.run_migrations().await?;
    }

    db.seed(&SeedData::sample()).await
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load configuration
    let config = match DashboardConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Initialize tracing
    init_tracing(
        &config.service_name,
        &config.common.log_level,
        config.common.otlp_endpoint.as_deref(),
    );
    init_metrics();

    tracing::info!(
        version = %config.service_version,
        db_max_connections = %config.database.max_connections,
        db_min_connections = %config.database.min_connections,
        query_timeout_secs = config.database.query_timeout.as_secs(),
        "Seeding database..."
    );

    let outcome = match Database::new(&config.database).await {
        Ok(db) => {
            let result = run(&db, &config).await;
            db.close().await;
            result
        }
        Err(e) => Err(e),
    };

    let code = match outcome {
        Ok(report) => {
            tracing::info!(rows_inserted = report.total(), "Seeding completed!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Error seeding database");
            ExitCode::FAILURE
        }
    };

    shutdown_tracing();
    code
}
