//! Configuration module for dashboard-service.

use service_core::config as core_config;
use service_core::error::AppError;
use sqlx::postgres::PgSslMode;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub common: core_config::Config,
    pub service_name: String,
    pub service_version: String,
    pub database: DatabaseConfig,
    pub skip_migrations: bool,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub ssl_mode: PgSslMode,
    /// Upper bound on a single store round trip.
    pub query_timeout: Duration,
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;

        Ok(Self {
            common,
            service_name: env::var("SERVICE_NAME")
                .unwrap_or_else(|_| "dashboard-service".to_string()),
            service_version: env::var("SERVICE_VERSION")
                .unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string()),
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").map_err(|_| {
                    AppError::ConfigError(anyhow::anyhow!("DATABASE_URL is required"))
                })?,
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
                min_connections: env::var("DATABASE_MIN_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(2),
                ssl_mode: parse_ssl_mode(
                    &env::var("DATABASE_SSL_MODE").unwrap_or_else(|_| "require".to_string()),
                )?,
                query_timeout: Duration::from_secs(
                    env::var("DATABASE_QUERY_TIMEOUT_SECS")
                        .ok()
                        .and_then(|s| s.parse().ok())
                        .unwrap_or(10),
                ),
            },
            skip_migrations: env::var("SEED_SKIP_MIGRATIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(false),
        })
    }
}

/// Parse `DATABASE_SSL_MODE`, refusing modes that allow plaintext connections.
pub fn parse_ssl_mode(value: &str) -> Result<PgSslMode, AppError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "require" => Ok(PgSslMode::Require),
        "verify-ca" => Ok(PgSslMode::VerifyCa),
        "verify-full" => Ok(PgSslMode::VerifyFull),
        other => Err(AppError::ConfigError(anyhow::anyhow!(
            "DATABASE_SSL_MODE must be one of require, verify-ca, verify-full (got '{}')",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_encrypted_ssl_modes() {
        assert!(matches!(parse_ssl_mode("require"), Ok(PgSslMode::Require)));
        assert!(matches!(parse_ssl_mode("Verify-CA"), Ok(PgSslMode::VerifyCa)));
        assert!(matches!(
            parse_ssl_mode(" verify-full "),
            Ok(PgSslMode::VerifyFull)
        ));
    }

    #[test]
    fn rejects_plaintext_ssl_modes() {
        for mode in ["disable", "allow", "prefer", ""] {
            let err = parse_ssl_mode(mode).unwrap_err();
            assert!(matches!(err, AppError::ConfigError(_)), "mode {mode}");
        }
    }
}
