//! Row parsing helpers.
//!
//! `SQLite`'s `datetime('now')` default yields `"2026-02-09 14:30:00"`, while
//! values written from Rust are RFC 3339. Both are accepted.

use chrono::{DateTime, Utc};
use sift_core::StoredDataset;

use crate::error::DatabaseError;

/// Column list matching [`dataset_from_row`].
pub const DATASET_COLUMNS: &str = "id, name, upload_date, data";

/// Parse a TEXT column as `DateTime<Utc>`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string matches neither format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Build a [`StoredDataset`] from a row selected with [`DATASET_COLUMNS`].
///
/// # Errors
///
/// Returns `DatabaseError` if a column is missing or has the wrong type.
pub fn dataset_from_row(row: &libsql::Row) -> Result<StoredDataset, DatabaseError> {
    Ok(StoredDataset {
        id: row.get::<i64>(0)?,
        name: row.get::<String>(1)?,
        upload_date: parse_datetime(&row.get::<String>(2)?)?,
        data: row.get::<String>(3)?,
    })
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    #[test]
    fn parses_sqlite_default_format() {
        let dt = parse_datetime("2026-02-09 14:30:05").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2026, 2, 9));
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (14, 30, 5));
    }

    #[test]
    fn parses_rfc3339_with_offset() {
        let dt = parse_datetime("2026-02-09T16:30:00+02:00").unwrap();
        assert_eq!(dt.hour(), 14);
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            parse_datetime("yesterday"),
            Err(DatabaseError::Query(msg)) if msg.contains("yesterday")
        ));
    }
}
