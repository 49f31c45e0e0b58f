//! # sift-ingest
//!
//! Turns uploaded bytes into a [`Table`] and back.
//!
//! - [`load`] dispatches on the file extension (`.csv`, `.xls`, `.xlsx`)
//! - [`read_csv`] / [`write_csv`] are the delimited-text codec, also used by
//!   `sift-db` to encode stored dataset bodies
//! - [`read_excel`] reads the first worksheet of a workbook
//!
//! Type inference follows the usual dataframe defaults: integer-looking
//! columns become integers, float-looking columns become floats, `True`/`False`
//! columns become booleans, everything else stays text.

mod csv_codec;
mod error;
mod excel;
mod format;
mod infer;

use std::path::Path;

use sift_core::Table;

pub use csv_codec::{read_csv, write_csv};
pub use error::IngestError;
pub use excel::read_excel;
pub use format::FileFormat;

/// Parse `bytes` according to the extension of `filename`.
///
/// # Errors
///
/// Returns `IngestError::UnsupportedFormat` for any extension other than
/// `.csv`, `.xls`, `.xlsx` (checked before any parsing), or a parse error.
pub fn load(bytes: &[u8], filename: &str) -> Result<Table, IngestError> {
    let format = FileFormat::from_filename(filename)?;
    tracing::debug!(%filename, %format, bytes = bytes.len(), "loading table");
    let table = match format {
        FileFormat::Csv => read_csv(bytes)?,
        FileFormat::Xls | FileFormat::Xlsx => read_excel(bytes)?,
    };
    tracing::debug!(
        rows = table.row_count(),
        columns = table.column_count(),
        "table loaded"
    );
    Ok(table)
}

/// Read a file from disk and [`load`] it.
///
/// # Errors
///
/// Returns `IngestError::UnsupportedFormat` before touching the file when the
/// extension is not recognized, `IngestError::Io` if the file cannot be read.
pub fn load_path(path: &Path) -> Result<Table, IngestError> {
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    FileFormat::from_filename(&filename)?;
    let bytes = std::fs::read(path)?;
    load(&bytes, &filename)
}
