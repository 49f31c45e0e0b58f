//! Configuration error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment extraction or merge error.
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    /// A store-backed command ran without a connection string.
    #[error("DATABASE_URL is not set (set it in the environment, .env, or [database] url in config.toml)")]
    MissingDatabaseUrl,

    /// A configuration field has an invalid value.
    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}
