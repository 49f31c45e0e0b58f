//! General application configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const fn default_preview_rows() -> usize {
    5
}

const fn default_histogram_bins() -> usize {
    30
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Rows shown by `inspect` and by `view` without `--limit`.
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,

    /// Histogram bin count when `--bins` is not given (5..=100).
    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            preview_rows: default_preview_rows(),
            histogram_bins: default_histogram_bins(),
        }
    }
}

impl GeneralConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !(5..=100).contains(&self.histogram_bins) {
            return Err(ConfigError::InvalidValue {
                field: "general.histogram_bins".into(),
                reason: format!("{} is outside 5..=100", self.histogram_bins),
            });
        }
        Ok(())
    }
}
