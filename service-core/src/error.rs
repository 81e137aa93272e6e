use thiserror::Error;

/// Startup failures: configuration, binding the listener, installing
/// recorders. Request-time failures are rendered by the service's handlers.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),
}

impl AppError {
    /// Shorthand for a configuration error built from a message.
    pub fn config(message: impl Into<String>) -> Self {
        AppError::ConfigError(anyhow::anyhow!(message.into()))
    }
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
