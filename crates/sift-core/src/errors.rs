//! Cross-cutting error types for Sift.
//!
//! Domain-specific errors (e.g., `IngestError`, `StatsError`, `DatabaseError`)
//! are defined in their respective crates. `anyhow` is used only in `sift-cli`
//! where all crate errors converge.

use thiserror::Error;

use crate::column::ColumnKind;

/// Errors raised while building or querying a [`Table`](crate::Table).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A column name was not found in the table.
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// Two columns share the same name.
    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    /// A column does not have the same number of rows as the rest of the table.
    #[error("Column '{column}' has {found} rows, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    /// A column has the wrong element kind for the requested operation.
    #[error("Column '{column}' is {found}, expected {expected}")]
    InvalidKind {
        column: String,
        expected: &'static str,
        found: ColumnKind,
    },

    /// No table is loaded in the current session.
    #[error("No data loaded: upload a file or load a stored dataset first")]
    NoData,
}
