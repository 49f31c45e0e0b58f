use std::fmt;

use crate::error::IngestError;

/// Recognized upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Xls,
    Xlsx,
}

impl FileFormat {
    /// Detect the format from a case-sensitive filename suffix.
    ///
    /// # Errors
    ///
    /// Returns `IngestError::UnsupportedFormat` for any other suffix.
    pub fn from_filename(filename: &str) -> Result<Self, IngestError> {
        if filename.ends_with(".csv") {
            Ok(Self::Csv)
        } else if filename.ends_with(".xlsx") {
            Ok(Self::Xlsx)
        } else if filename.ends_with(".xls") {
            Ok(Self::Xls)
        } else {
            Err(IngestError::UnsupportedFormat(filename.to_string()))
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xls => "xls",
            Self::Xlsx => "xlsx",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
