//! Database error types for sift-db.

use std::time::Duration;

use thiserror::Error;

/// Errors from dataset store operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// The store could not be reached or initialized after every retry.
    #[error("Dataset store unavailable after {attempts} attempt(s): {reason}")]
    Unavailable { attempts: u32, reason: String },

    /// No stored dataset has this id.
    #[error("Dataset {0} not found")]
    NotFound(i64),

    /// A stored body could not be encoded or decoded.
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// The connection settings cannot be used as given.
    #[error("Invalid store configuration: {0}")]
    InvalidConfig(String),

    /// Opening the store took longer than the configured timeout.
    #[error("Connection timed out after {0:?}")]
    Timeout(Duration),

    /// A SQL query failed or returned an unexpected shape.
    #[error("Query failed: {0}")]
    Query(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),
}

impl DatabaseError {
    /// Failures worth another connection attempt. Configuration problems
    /// never heal on their own.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::LibSql(_) | Self::Query(_) | Self::Timeout(_))
    }
}
