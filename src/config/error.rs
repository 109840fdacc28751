//! Configuration error types

use thiserror::Error;

/// Failure to produce an `AppConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment could not be read or deserialized.
    #[error("could not load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] ValidationError),
}

/// A loaded value that fails semantic checks.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingRequired(&'static str),

    #[error("'{0}' is not a valid listen address")]
    InvalidAddress(String),

    #[error("port must be non-zero")]
    InvalidPort,

    #[error("timeout must be between 1 and 300 seconds")]
    InvalidTimeout,

    #[error("api_prefix must start with '/' and not end with '/'")]
    InvalidApiPrefix,

    #[error("database url must use the postgres:// or postgresql:// scheme")]
    InvalidDatabaseUrl,

    #[error("min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("max_connections exceeds 100")]
    PoolSizeTooLarge,

    #[error("model base_url must use http or https")]
    InvalidModelBaseUrl,

    #[error("model name must not be empty")]
    EmptyModelName,
}
