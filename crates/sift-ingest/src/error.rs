use thiserror::Error;

/// Errors from loading or encoding tables.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The filename does not end in `.csv`, `.xls`, or `.xlsx`.
    #[error("Unsupported file format: {0} (expected .csv, .xls, or .xlsx)")]
    UnsupportedFormat(String),

    /// A data row has more fields than the header.
    #[error("Malformed CSV at line {line}: expected {expected} fields, found {found}")]
    Malformed {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// The workbook contains no worksheet.
    #[error("Workbook has no worksheets")]
    EmptyWorkbook,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Excel error: {0}")]
    Excel(#[from] calamine::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] sift_core::CoreError),
}
