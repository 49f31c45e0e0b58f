//! In-memory table: an ordered set of equal-length, uniquely named columns.

use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::column::{Cell, Column};
use crate::column_set::ColumnSet;
use crate::errors::CoreError;

/// Sort direction for [`Table::sort_by`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Rows × typed columns. Read-only to the statistics engines; replaced
/// wholesale when new data is loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Build a table, checking that names are unique and lengths agree.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::DuplicateColumn` or `CoreError::LengthMismatch`.
    pub fn new(columns: Vec<Column>) -> Result<Self, CoreError> {
        let expected = columns.first().map_or(0, Column::len);
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.name()) {
                return Err(CoreError::DuplicateColumn(column.name().to_string()));
            }
            if column.len() != expected {
                return Err(CoreError::LengthMismatch {
                    column: column.name().to_string(),
                    expected,
                    found: column.len(),
                });
            }
        }
        Ok(Self { columns })
    }

    /// A table with no columns and no rows.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    /// Look up a column by name.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnknownColumn` if no column has that name.
    pub fn column(&self, name: &str) -> Result<&Column, CoreError> {
        self.columns
            .iter()
            .find(|column| column.name() == name)
            .ok_or_else(|| CoreError::UnknownColumn(name.to_string()))
    }

    /// Total missing cells across all columns.
    #[must_use]
    pub fn missing_total(&self) -> usize {
        self.columns.iter().map(Column::missing_count).sum()
    }

    /// Partition column names into numeric and categorical sets.
    #[must_use]
    pub fn column_set(&self) -> ColumnSet {
        ColumnSet::classify(self)
    }

    /// All cells of one row, in column order.
    #[must_use]
    pub fn row(&self, index: usize) -> Vec<Cell> {
        self.columns.iter().map(|column| column.cell(index)).collect()
    }

    /// Keep only the named columns, in the order given.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnknownColumn` or `CoreError::DuplicateColumn`.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Self, CoreError> {
        let columns = names
            .iter()
            .map(|name| self.column(name.as_ref()).cloned())
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(columns)
    }

    /// Stable sort by one column. Missing cells go last in either direction.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnknownColumn` if the sort column does not exist.
    pub fn sort_by(&self, name: &str, order: SortOrder) -> Result<Self, CoreError> {
        let key = self.column(name)?;
        let mut rows: Vec<usize> = (0..self.row_count()).collect();
        rows.sort_by(|&a, &b| {
            match (key.data().is_missing(a), key.data().is_missing(b)) {
                (true, true) => std::cmp::Ordering::Equal,
                (true, false) => std::cmp::Ordering::Greater,
                (false, true) => std::cmp::Ordering::Less,
                (false, false) => match order {
                    SortOrder::Ascending => key.compare_rows(a, b),
                    SortOrder::Descending => key.compare_rows(b, a),
                },
            }
        });
        Ok(self.take_rows(&rows))
    }

    /// First `n` rows.
    #[must_use]
    pub fn head(&self, n: usize) -> Self {
        let rows: Vec<usize> = (0..self.row_count().min(n)).collect();
        self.take_rows(&rows)
    }

    /// Re-declare a column as the explicit category kind.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnknownColumn` or `CoreError::InvalidKind`.
    pub fn categorize(&mut self, name: &str) -> Result<(), CoreError> {
        let index = self
            .columns
            .iter()
            .position(|column| column.name() == name)
            .ok_or_else(|| CoreError::UnknownColumn(name.to_string()))?;
        self.columns[index] = self.columns[index].clone().into_category()?;
        Ok(())
    }

    fn take_rows(&self, rows: &[usize]) -> Self {
        Self {
            columns: self.columns.iter().map(|column| column.take(rows)).collect(),
        }
    }
}
