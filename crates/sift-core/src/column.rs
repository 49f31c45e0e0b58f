//! Typed column storage.
//!
//! Every column holds a single element kind. Cells are `Option<T>`; `None` is
//! the missing-value marker. Float columns never hold `NaN`: it is folded
//! into `None` when the column is built.

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDateTime;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Datetime rendering used for display and delimited-text serialization.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ---------------------------------------------------------------------------
// ColumnKind
// ---------------------------------------------------------------------------

/// Declared element kind of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Integer,
    Float,
    Boolean,
    Text,
    Category,
    DateTime,
}

impl ColumnKind {
    /// Return the string representation used in output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Text => "text",
            Self::Category => "category",
            Self::DateTime => "date_time",
        }
    }

    /// Integer and floating-point kinds.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }

    /// Text and explicit category kinds.
    #[must_use]
    pub const fn is_categorical(self) -> bool {
        matches!(self, Self::Text | Self::Category)
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// A single cell value, detached from its column.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(untagged)]
pub enum Cell {
    Missing,
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Text(String),
    DateTime(NaiveDateTime),
}

impl Cell {
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => Ok(()),
            Self::Integer(value) => write!(f, "{value}"),
            // Debug keeps the trailing `.0` so integral floats stay floats when re-read.
            Self::Float(value) => write!(f, "{value:?}"),
            Self::Boolean(true) => f.write_str("True"),
            Self::Boolean(false) => f.write_str("False"),
            Self::Text(value) => f.write_str(value),
            Self::DateTime(value) => write!(f, "{}", value.format(DATETIME_FORMAT)),
        }
    }
}

// ---------------------------------------------------------------------------
// ColumnData
// ---------------------------------------------------------------------------

/// Cell storage for one column, one vector per element kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Integer(Vec<Option<i64>>),
    Float(Vec<Option<f64>>),
    Boolean(Vec<Option<bool>>),
    Text(Vec<Option<String>>),
    Category(Vec<Option<String>>),
    DateTime(Vec<Option<NaiveDateTime>>),
}

impl ColumnData {
    #[must_use]
    pub const fn kind(&self) -> ColumnKind {
        match self {
            Self::Integer(_) => ColumnKind::Integer,
            Self::Float(_) => ColumnKind::Float,
            Self::Boolean(_) => ColumnKind::Boolean,
            Self::Text(_) => ColumnKind::Text,
            Self::Category(_) => ColumnKind::Category,
            Self::DateTime(_) => ColumnKind::DateTime,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Integer(values) => values.len(),
            Self::Float(values) => values.len(),
            Self::Boolean(values) => values.len(),
            Self::Text(values) | Self::Category(values) => values.len(),
            Self::DateTime(values) => values.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of missing cells.
    #[must_use]
    pub fn missing_count(&self) -> usize {
        match self {
            Self::Integer(values) => count_missing(values),
            Self::Float(values) => count_missing(values),
            Self::Boolean(values) => count_missing(values),
            Self::Text(values) | Self::Category(values) => count_missing(values),
            Self::DateTime(values) => count_missing(values),
        }
    }

    /// Whether the cell at `row` is missing. Out-of-range rows count as missing.
    #[must_use]
    pub fn is_missing(&self, row: usize) -> bool {
        self.cell(row).is_missing()
    }

    /// Copy out the cell at `row`.
    #[must_use]
    pub fn cell(&self, row: usize) -> Cell {
        match self {
            Self::Integer(values) => values.get(row).copied().flatten().map_or(Cell::Missing, Cell::Integer),
            Self::Float(values) => values.get(row).copied().flatten().map_or(Cell::Missing, Cell::Float),
            Self::Boolean(values) => values.get(row).copied().flatten().map_or(Cell::Missing, Cell::Boolean),
            Self::Text(values) | Self::Category(values) => values
                .get(row)
                .and_then(Option::as_ref)
                .map_or(Cell::Missing, |value| Cell::Text(value.clone())),
            Self::DateTime(values) => values.get(row).copied().flatten().map_or(Cell::Missing, Cell::DateTime),
        }
    }

    fn take(&self, rows: &[usize]) -> Self {
        match self {
            Self::Integer(values) => Self::Integer(pick(values, rows)),
            Self::Float(values) => Self::Float(pick(values, rows)),
            Self::Boolean(values) => Self::Boolean(pick(values, rows)),
            Self::Text(values) => Self::Text(pick(values, rows)),
            Self::Category(values) => Self::Category(pick(values, rows)),
            Self::DateTime(values) => Self::DateTime(pick(values, rows)),
        }
    }

    /// Compare two present cells. Missing cells compare equal to everything;
    /// callers order them separately.
    fn compare(&self, a: usize, b: usize) -> Ordering {
        match self {
            Self::Integer(values) => compare_present(values, a, b, Ord::cmp),
            Self::Float(values) => compare_present(values, a, b, f64::total_cmp),
            Self::Boolean(values) => compare_present(values, a, b, Ord::cmp),
            Self::Text(values) | Self::Category(values) => compare_present(values, a, b, Ord::cmp),
            Self::DateTime(values) => compare_present(values, a, b, Ord::cmp),
        }
    }
}

fn count_missing<T>(values: &[Option<T>]) -> usize {
    values.iter().filter(|value| value.is_none()).count()
}

fn pick<T: Clone>(values: &[Option<T>], rows: &[usize]) -> Vec<Option<T>> {
    rows.iter()
        .map(|&row| values.get(row).cloned().flatten())
        .collect()
}

fn labels_of<T: ToString>(values: Vec<Option<T>>) -> Vec<Option<String>> {
    values.into_iter().map(|v| v.map(|x| x.to_string())).collect()
}

fn compare_present<T>(
    values: &[Option<T>],
    a: usize,
    b: usize,
    cmp: impl Fn(&T, &T) -> Ordering,
) -> Ordering {
    match (values.get(a).and_then(Option::as_ref), values.get(b).and_then(Option::as_ref)) {
        (Some(left), Some(right)) => cmp(left, right),
        _ => Ordering::Equal,
    }
}

// ---------------------------------------------------------------------------
// Column
// ---------------------------------------------------------------------------

/// A named, typed column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    data: ColumnData,
}

impl Column {
    /// Build a column. `NaN` floats are stored as missing.
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        let data = match data {
            ColumnData::Float(values) => ColumnData::Float(
                values
                    .into_iter()
                    .map(|value| value.filter(|v| !v.is_nan()))
                    .collect(),
            ),
            other => other,
        };
        Self {
            name: name.into(),
            data,
        }
    }

    pub fn integers(name: impl Into<String>, values: impl IntoIterator<Item = Option<i64>>) -> Self {
        Self::new(name, ColumnData::Integer(values.into_iter().collect()))
    }

    pub fn floats(name: impl Into<String>, values: impl IntoIterator<Item = Option<f64>>) -> Self {
        Self::new(name, ColumnData::Float(values.into_iter().collect()))
    }

    pub fn texts<S: Into<String>>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = Option<S>>,
    ) -> Self {
        Self::new(
            name,
            ColumnData::Text(values.into_iter().map(|v| v.map(Into::into)).collect()),
        )
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn data(&self) -> &ColumnData {
        &self.data
    }

    #[must_use]
    pub const fn kind(&self) -> ColumnKind {
        self.data.kind()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn missing_count(&self) -> usize {
        self.data.missing_count()
    }

    #[must_use]
    pub fn cell(&self, row: usize) -> Cell {
        self.data.cell(row)
    }

    /// Numeric value at `row`, or `None` when missing or not a numeric column.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn numeric_at(&self, row: usize) -> Option<f64> {
        match &self.data {
            ColumnData::Integer(values) => values.get(row).copied().flatten().map(|v| v as f64),
            ColumnData::Float(values) => values.get(row).copied().flatten(),
            _ => None,
        }
    }

    /// All present values of a numeric column, in row order.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidKind` if the column is not integer or float.
    pub fn numeric_values(&self) -> Result<Vec<f64>, CoreError> {
        if !self.kind().is_numeric() {
            return Err(self.kind_error("numeric"));
        }
        Ok((0..self.len()).filter_map(|row| self.numeric_at(row)).collect())
    }

    /// Label at `row` for text and category columns.
    #[must_use]
    pub fn label_at(&self, row: usize) -> Option<&str> {
        match &self.data {
            ColumnData::Text(values) | ColumnData::Category(values) => {
                values.get(row).and_then(Option::as_deref)
            }
            _ => None,
        }
    }

    /// Raw labels of a text or category column.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidKind` for any other column kind.
    pub fn labels(&self) -> Result<&[Option<String>], CoreError> {
        match &self.data {
            ColumnData::Text(values) | ColumnData::Category(values) => Ok(values),
            _ => Err(self.kind_error("categorical")),
        }
    }

    /// Convert a column into the explicit category kind. Integer and boolean
    /// cells become their display labels; missing cells stay missing.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidKind` for float and datetime columns.
    pub fn into_category(self) -> Result<Self, CoreError> {
        if matches!(self.data, ColumnData::Float(_) | ColumnData::DateTime(_)) {
            return Err(self.kind_error("text, integer, or boolean"));
        }
        let data = match self.data {
            ColumnData::Text(values) | ColumnData::Category(values) => ColumnData::Category(values),
            ColumnData::Integer(values) => ColumnData::Category(labels_of(values)),
            ColumnData::Boolean(values) => ColumnData::Category(
                values
                    .into_iter()
                    .map(|v| v.map(|b| Cell::Boolean(b).to_string()))
                    .collect(),
            ),
            other => other,
        };
        Ok(Self {
            name: self.name,
            data,
        })
    }

    pub(crate) fn take(&self, rows: &[usize]) -> Self {
        Self {
            name: self.name.clone(),
            data: self.data.take(rows),
        }
    }

    pub(crate) fn compare_rows(&self, a: usize, b: usize) -> Ordering {
        self.data.compare(a, b)
    }

    fn kind_error(&self, expected: &'static str) -> CoreError {
        CoreError::InvalidKind {
            column: self.name.clone(),
            expected,
            found: self.kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_floats_become_missing() {
        let column = Column::floats("x", [Some(1.0), Some(f64::NAN), None]);
        assert_eq!(column.missing_count(), 2);
        assert_eq!(column.numeric_values().unwrap(), vec![1.0]);
    }

    #[test]
    fn integer_cells_read_as_numeric() {
        let column = Column::integers("n", [Some(3), None, Some(-1)]);
        assert_eq!(column.numeric_at(0), Some(3.0));
        assert_eq!(column.numeric_at(1), None);
        assert_eq!(column.numeric_values().unwrap(), vec![3.0, -1.0]);
    }

    #[test]
    fn numeric_values_rejects_text() {
        let column = Column::texts("g", [Some("a")]);
        let err = column.numeric_values().unwrap_err();
        assert!(matches!(err, CoreError::InvalidKind { ref column, .. } if column == "g"));
    }

    #[test]
    fn text_converts_to_category() {
        let column = Column::texts("g", [Some("a"), None]).into_category().unwrap();
        assert_eq!(column.kind(), ColumnKind::Category);
        assert_eq!(column.label_at(0), Some("a"));
        assert_eq!(column.label_at(1), None);
    }

    #[test]
    fn integer_codes_become_labels() {
        let column = Column::integers("site", [Some(2), None, Some(10)])
            .into_category()
            .unwrap();
        assert_eq!(column.kind(), ColumnKind::Category);
        assert_eq!(column.label_at(0), Some("2"));
        assert_eq!(column.label_at(1), None);
        assert_eq!(column.label_at(2), Some("10"));
    }

    #[test]
    fn float_column_cannot_become_category() {
        assert!(Column::floats("x", [Some(1.5)]).into_category().is_err());
    }

    #[test]
    fn cell_display_matches_serialized_text() {
        assert_eq!(Cell::Float(3.0).to_string(), "3.0");
        assert_eq!(Cell::Float(0.25).to_string(), "0.25");
        assert_eq!(Cell::Integer(7).to_string(), "7");
        assert_eq!(Cell::Boolean(false).to_string(), "False");
        assert_eq!(Cell::Missing.to_string(), "");
    }

    #[test]
    fn kinds_partition_numeric_and_categorical() {
        for kind in [
            ColumnKind::Integer,
            ColumnKind::Float,
            ColumnKind::Boolean,
            ColumnKind::Text,
            ColumnKind::Category,
            ColumnKind::DateTime,
        ] {
            assert!(!(kind.is_numeric() && kind.is_categorical()), "{kind}");
        }
        assert!(!ColumnKind::Boolean.is_numeric());
        assert!(!ColumnKind::DateTime.is_categorical());
    }
}
