//! Dataset table creation.

use crate::error::DatabaseError;

const DATASETS_SQL: &str = include_str!("../migrations/001_datasets.sql");

/// Name of the table holding stored datasets.
pub const DATASETS_TABLE: &str = "datasets";

/// Whether `name` exists as a table in the connected database.
///
/// # Errors
///
/// Returns `DatabaseError` if the catalog query fails.
pub async fn has_table(conn: &libsql::Connection, name: &str) -> Result<bool, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [name],
        )
        .await?;
    Ok(rows.next().await?.is_some())
}

/// Create the datasets table if it does not exist yet. Existing rows are
/// left untouched.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the table cannot be created.
pub async fn ensure_schema(conn: &libsql::Connection) -> Result<(), DatabaseError> {
    if has_table(conn, DATASETS_TABLE).await? {
        tracing::debug!(table = DATASETS_TABLE, "schema already present");
        return Ok(());
    }
    conn.execute_batch(DATASETS_SQL)
        .await
        .map_err(|e| DatabaseError::Query(format!("create {DATASETS_TABLE}: {e}")))?;
    tracing::info!(table = DATASETS_TABLE, "created dataset table");
    Ok(())
}
