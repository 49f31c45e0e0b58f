//! First-worksheet reader for `.xls` / `.xlsx` workbooks.

use std::io::Cursor;

use calamine::{Data, DataType, Reader};
use chrono::NaiveDateTime;
use sift_core::{Cell, Column, ColumnData, Table};

use crate::error::IngestError;
use crate::infer::{dedupe_headers, is_missing_marker};

/// Parse the first worksheet of a workbook. The first row is the header.
///
/// # Errors
///
/// Returns `IngestError::Excel` if the bytes are not a workbook, or
/// `IngestError::EmptyWorkbook` if it has no sheets.
pub fn read_excel(bytes: &[u8]) -> Result<Table, IngestError> {
    let mut workbook = calamine::open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(IngestError::EmptyWorkbook)??;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Table::empty());
    };
    let names = dedupe_headers(header.iter().map(header_text));

    let mut cells: Vec<Vec<&Data>> = vec![Vec::new(); names.len()];
    for row in rows {
        for (index, column) in cells.iter_mut().enumerate() {
            column.push(row.get(index).unwrap_or(&Data::Empty));
        }
    }

    let columns = names
        .into_iter()
        .zip(cells)
        .map(|(name, column)| column_from_cells(name, &column))
        .collect();
    Ok(Table::new(columns)?)
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Native value of one spreadsheet cell after missing-value handling.
#[derive(Debug, Clone, PartialEq)]
enum Native {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Text(String),
    DateTime(NaiveDateTime),
}

impl Native {
    #[allow(clippy::cast_possible_truncation)]
    fn from_data(cell: &Data) -> Option<Self> {
        match cell {
            Data::Empty | Data::Error(_) => None,
            Data::Int(value) => Some(Self::Integer(*value)),
            // Spreadsheets store whole numbers as floats.
            Data::Float(value) if value.fract() == 0.0 && value.abs() < 9.0e15 => {
                Some(Self::Integer(*value as i64))
            }
            Data::Float(value) if value.is_nan() => None,
            Data::Float(value) => Some(Self::Float(*value)),
            Data::Bool(value) => Some(Self::Boolean(*value)),
            Data::String(text) if is_missing_marker(text) => None,
            Data::String(text) => Some(Self::Text(text.clone())),
            Data::DateTime(_) | Data::DateTimeIso(_) => Some(
                cell.as_datetime()
                    .map_or_else(|| Self::Text(cell.to_string()), Self::DateTime),
            ),
            Data::DurationIso(text) => Some(Self::Text(text.clone())),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(value) => Some(*value as f64),
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }

    fn into_text(self) -> String {
        match self {
            Self::Integer(value) => Cell::Integer(value).to_string(),
            Self::Float(value) => Cell::Float(value).to_string(),
            Self::Boolean(value) => Cell::Boolean(value).to_string(),
            Self::Text(value) => value,
            Self::DateTime(value) => Cell::DateTime(value).to_string(),
        }
    }
}

/// Build one column, unifying cell kinds: integers and floats widen to
/// float, any other mix falls back to text.
fn column_from_cells(name: String, cells: &[&Data]) -> Column {
    let values: Vec<Option<Native>> = cells.iter().map(|cell| Native::from_data(cell)).collect();
    let present = || values.iter().flatten();

    let data = if present().next().is_none() {
        ColumnData::Float(vec![None; values.len()])
    } else if present().all(|v| matches!(v, Native::Integer(_))) {
        ColumnData::Integer(
            values
                .iter()
                .map(|v| match v {
                    Some(Native::Integer(value)) => Some(*value),
                    _ => None,
                })
                .collect(),
        )
    } else if present().all(|v| v.as_f64().is_some()) {
        ColumnData::Float(values.iter().map(|v| v.as_ref().and_then(Native::as_f64)).collect())
    } else if present().all(|v| matches!(v, Native::Boolean(_))) {
        ColumnData::Boolean(
            values
                .iter()
                .map(|v| match v {
                    Some(Native::Boolean(value)) => Some(*value),
                    _ => None,
                })
                .collect(),
        )
    } else if present().all(|v| matches!(v, Native::DateTime(_))) {
        ColumnData::DateTime(
            values
                .iter()
                .map(|v| match v {
                    Some(Native::DateTime(value)) => Some(*value),
                    _ => None,
                })
                .collect(),
        )
    } else {
        ColumnData::Text(values.into_iter().map(|v| v.map(Native::into_text)).collect())
    };
    Column::new(name, data)
}
