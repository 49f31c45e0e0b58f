use sift_core::CoreError;
use thiserror::Error;

/// Expected failures of the statistical engines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    /// Too few values or groups for the requested computation.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// The sample has no spread, so the statistic is undefined.
    #[error("Degenerate sample: {0}")]
    Degenerate(String),

    /// The sample holds an infinite or NaN value.
    #[error("Non-finite value in {0}")]
    NonFinite(String),

    /// Paired samples of different lengths.
    #[error("Paired samples differ in length: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    /// A reference distribution could not be built.
    #[error("Distribution error: {0}")]
    Distribution(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StatsError {
    pub(crate) fn insufficient(message: impl Into<String>) -> Self {
        Self::InsufficientData(message.into())
    }

    pub(crate) fn degenerate(message: impl Into<String>) -> Self {
        Self::Degenerate(message.into())
    }

    /// Reject samples holding `inf`, `-inf`, or NaN before any statistic
    /// is computed from them.
    pub(crate) fn ensure_finite(values: &[f64], label: &str) -> Result<(), Self> {
        if values.iter().all(|v| v.is_finite()) {
            Ok(())
        } else {
            Err(Self::NonFinite(label.to_string()))
        }
    }

    pub(crate) fn distribution(error: impl std::fmt::Display) -> Self {
        Self::Distribution(error.to_string())
    }
}
