//! Delimited-text reader and writer.

use std::io;

use sift_core::Table;

use crate::error::IngestError;
use crate::infer::{column_from_text, dedupe_headers};

/// Parse comma-separated text with a header row into a [`Table`].
///
/// Rows shorter than the header are padded with missing cells. Empty input
/// yields an empty table.
///
/// # Errors
///
/// Returns `IngestError::Malformed` for a row longer than the header, or
/// `IngestError::Csv` for invalid UTF-8 and quoting errors.
pub fn read_csv(bytes: &[u8]) -> Result<Table, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let names = dedupe_headers(reader.headers()?.iter());
    if names.is_empty() {
        return Ok(Table::empty());
    }

    let mut fields: Vec<Vec<String>> = vec![Vec::new(); names.len()];
    for result in reader.records() {
        let record = result?;
        if record.len() > names.len() {
            return Err(IngestError::Malformed {
                line: record.position().map_or(0, csv::Position::line),
                expected: names.len(),
                found: record.len(),
            });
        }
        for (index, column) in fields.iter_mut().enumerate() {
            column.push(record.get(index).unwrap_or_default().to_string());
        }
    }

    let columns = names
        .into_iter()
        .zip(fields)
        .map(|(name, values)| column_from_text(name, values))
        .collect();
    Ok(Table::new(columns)?)
}

/// Encode a [`Table`] as comma-separated text with a header row.
///
/// Output re-reads through [`read_csv`] to the same column names and cell
/// values.
///
/// # Errors
///
/// Returns `IngestError::Csv` or `IngestError::Io` if the writer fails.
pub fn write_csv(table: &Table) -> Result<String, IngestError> {
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
    if table.column_count() > 0 {
        writer.write_record(table.column_names())?;
        for row in 0..table.row_count() {
            writer.write_record(table.row(row).iter().map(ToString::to_string))?;
        }
    }
    let bytes = writer
        .into_inner()
        .map_err(|error| IngestError::Io(error.into_error()))?;
    String::from_utf8(bytes).map_err(|error| IngestError::Io(io::Error::new(io::ErrorKind::InvalidData, error)))
}
