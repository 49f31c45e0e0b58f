use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A named snapshot of a table, persisted as delimited text.
///
/// One record exists per save; records are never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StoredDataset {
    pub id: i64,
    pub name: String,
    pub upload_date: DateTime<Utc>,
    pub data: String,
}

/// Listing entry for a stored dataset. `error` is set when the stored body
/// could not be decoded; `rows` and `columns` are then absent.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DatasetOverview {
    pub id: i64,
    pub name: String,
    pub upload_date: DateTime<Utc>,
    pub rows: Option<usize>,
    pub columns: Option<usize>,
    pub error: Option<String>,
}
