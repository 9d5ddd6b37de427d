use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(anyhow::Error),

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),

    #[error("Database error: {0}")]
    DatabaseError(anyhow::Error),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_error_display_includes_cause() {
        let err = AppError::DatabaseError(anyhow::anyhow!("Failed to connect: refused"));
        assert_eq!(err.to_string(), "Database error: Failed to connect: refused");
    }

    #[test]
    fn io_error_maps_to_internal_error() {
        let io = std::io::Error::other("disk gone");
        let err: AppError = io.into();
        assert!(matches!(err, AppError::InternalError(_)));
    }

    #[test]
    fn config_error_maps_to_config_variant() {
        let err: AppError = config::ConfigError::NotFound("log_level".to_string()).into();
        assert!(matches!(err, AppError::ConfigError(_)));
        assert!(err.to_string().starts_with("Configuration error"));
    }
}
