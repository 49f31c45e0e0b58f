//! Response types returned as JSON by `sift` commands.
//!
//! These structs define the shape of output for commands like `sift inspect`
//! and `sift view`.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::column::{Cell, ColumnKind};
use crate::column_set::ColumnSet;
use crate::dataset::StoredDataset;
use crate::table::Table;

/// One column's declared kind and missing count.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    pub kind: ColumnKind,
    pub missing: usize,
}

/// Response from `sift inspect`: shape, missing total, and classification.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TableInfo {
    pub rows: usize,
    pub columns: usize,
    pub missing_values: usize,
    pub column_set: ColumnSet,
    pub column_details: Vec<ColumnInfo>,
}

impl TableInfo {
    #[must_use]
    pub fn from_table(table: &Table) -> Self {
        Self {
            rows: table.row_count(),
            columns: table.column_count(),
            missing_values: table.missing_total(),
            column_set: table.column_set(),
            column_details: table
                .columns()
                .iter()
                .map(|column| ColumnInfo {
                    name: column.name().to_string(),
                    kind: column.kind(),
                    missing: column.missing_count(),
                })
                .collect(),
        }
    }
}

/// Response from `sift view` and the preview of `sift inspect`.
#[derive(Debug, Clone, Serialize, JsonSchema, PartialEq)]
pub struct TablePreview {
    /// Row count of the table the preview was cut from.
    pub total_rows: usize,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl TablePreview {
    /// Render the first `limit` rows of `table`.
    #[must_use]
    pub fn from_table(table: &Table, limit: usize) -> Self {
        let head = table.head(limit);
        Self {
            total_rows: table.row_count(),
            columns: head.column_names().into_iter().map(String::from).collect(),
            rows: (0..head.row_count()).map(|row| head.row(row)).collect(),
        }
    }
}

/// Response from `sift inspect`.
#[derive(Debug, Clone, Serialize, JsonSchema, PartialEq)]
pub struct InspectResponse {
    /// Stored dataset the table was loaded from, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset_id: Option<i64>,
    pub info: TableInfo,
    pub preview: TablePreview,
}

impl InspectResponse {
    #[must_use]
    pub fn from_table(table: &Table, dataset_id: Option<i64>, preview_rows: usize) -> Self {
        Self {
            dataset_id,
            info: TableInfo::from_table(table),
            preview: TablePreview::from_table(table, preview_rows),
        }
    }
}

/// Response from `sift dataset show`: the record's metadata with the decoded
/// table's shape and first rows. The encoded body is left out.
#[derive(Debug, Clone, Serialize, JsonSchema, PartialEq)]
pub struct DatasetDetail {
    pub id: i64,
    pub name: String,
    pub upload_date: DateTime<Utc>,
    pub info: TableInfo,
    pub preview: TablePreview,
}

impl DatasetDetail {
    #[must_use]
    pub fn new(stored: &StoredDataset, table: &Table, preview_rows: usize) -> Self {
        Self {
            id: stored.id,
            name: stored.name.clone(),
            upload_date: stored.upload_date,
            info: TableInfo::from_table(table),
            preview: TablePreview::from_table(table, preview_rows),
        }
    }
}
