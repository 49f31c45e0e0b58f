//! Cohen's d with pooled standard deviation.

use std::fmt;

use schemars::JsonSchema;
use serde::Serialize;

use crate::descriptive::{mean, variance};
use crate::error::StatsError;

pub const COHENS_D: &str = "Cohen's d";

/// Qualitative bucket for `|d|`. Bounds are upper-exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EffectMagnitude {
    Negligible,
    Small,
    Medium,
    Large,
}

impl EffectMagnitude {
    #[must_use]
    pub fn from_d(d: f64) -> Self {
        match d.abs() {
            v if v < 0.2 => Self::Negligible,
            v if v < 0.5 => Self::Small,
            v if v < 0.8 => Self::Medium,
            _ => Self::Large,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Negligible => "negligible",
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    /// Human-readable interpretation, e.g. `"Medium effect"`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Negligible => "Negligible effect",
            Self::Small => "Small effect",
            Self::Medium => "Medium effect",
            Self::Large => "Large effect",
        }
    }
}

impl fmt::Display for EffectMagnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct EffectSize {
    pub metric: String,
    pub value: f64,
    pub magnitude: EffectMagnitude,
    pub interpretation: String,
}

impl EffectSize {
    fn new(value: f64) -> Self {
        let magnitude = EffectMagnitude::from_d(value);
        Self {
            metric: COHENS_D.to_string(),
            value,
            magnitude,
            interpretation: magnitude.label().to_string(),
        }
    }
}

/// `d = (mean(left) - mean(right)) / pooled_std`.
///
/// # Errors
///
/// `InsufficientData` when either sample has fewer than two values,
/// `NonFinite` for infinite or NaN values, `Degenerate` when the pooled
/// standard deviation is zero but the means differ.
#[allow(clippy::cast_precision_loss)]
pub fn cohens_d(left: &[f64], right: &[f64]) -> Result<EffectSize, StatsError> {
    StatsError::ensure_finite(left, "first sample")?;
    StatsError::ensure_finite(right, "second sample")?;
    let (Some(m1), Some(m2), Some(v1), Some(v2)) =
        (mean(left), mean(right), variance(left), variance(right))
    else {
        return Err(StatsError::insufficient(format!(
            "effect size needs at least 2 values per sample, got {} and {}",
            left.len(),
            right.len()
        )));
    };
    let (n1, n2) = (left.len() as f64, right.len() as f64);
    let pooled = (((n1 - 1.0) * v1 + (n2 - 1.0) * v2) / (n1 + n2 - 2.0)).sqrt();
    let difference = m1 - m2;

    let d = if pooled == 0.0 {
        if difference != 0.0 {
            return Err(StatsError::degenerate(
                "pooled standard deviation is zero but the means differ",
            ));
        }
        0.0
    } else {
        difference / pooled
    };
    Ok(EffectSize::new(d))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0.0, EffectMagnitude::Negligible)]
    #[case(0.199, EffectMagnitude::Negligible)]
    #[case(0.2, EffectMagnitude::Small)]
    #[case(-0.3, EffectMagnitude::Small)]
    #[case(0.5, EffectMagnitude::Medium)]
    #[case(0.79, EffectMagnitude::Medium)]
    #[case(0.8, EffectMagnitude::Large)]
    #[case(-2.5, EffectMagnitude::Large)]
    fn buckets_use_upper_exclusive_bounds(#[case] d: f64, #[case] expected: EffectMagnitude) {
        assert_eq!(EffectMagnitude::from_d(d), expected);
    }

    #[test]
    fn identical_constant_samples_have_no_effect() {
        let result = cohens_d(&[1.0, 1.0, 1.0], &[1.0, 1.0, 1.0]).unwrap();
        assert_eq!(result.value, 0.0);
        assert_eq!(result.interpretation, "Negligible effect");
        assert_eq!(result.metric, "Cohen's d");
    }

    #[test]
    fn constant_samples_with_different_means_are_degenerate() {
        assert!(matches!(
            cohens_d(&[1.0, 1.0], &[2.0, 2.0]),
            Err(StatsError::Degenerate(_))
        ));
    }

    #[test]
    fn antisymmetric() {
        let a = [2.0, 4.0, 4.0, 5.0];
        let b = [1.0, 3.0, 2.0, 2.5, 3.5];
        let ab = cohens_d(&a, &b).unwrap().value;
        let ba = cohens_d(&b, &a).unwrap().value;
        assert!((ab + ba).abs() < 1e-12);
        assert!(ab > 0.0);
    }

    #[test]
    fn known_value() {
        // means 3 and 5, both variances 2.5 -> d = -2 / sqrt(2.5)
        let result = cohens_d(&[1.0, 2.0, 3.0, 4.0, 5.0], &[3.0, 4.0, 5.0, 6.0, 7.0]).unwrap();
        assert!((result.value + 2.0 / 2.5_f64.sqrt()).abs() < 1e-12);
        assert_eq!(result.magnitude, EffectMagnitude::Large);
    }

    #[test]
    fn infinite_value_is_rejected() {
        assert!(matches!(
            cohens_d(&[1.0, f64::INFINITY, 3.0], &[1.0, 2.0, 2.5]),
            Err(StatsError::NonFinite(_))
        ));
    }

    #[test]
    fn single_value_sample_is_insufficient() {
        assert!(matches!(
            cohens_d(&[1.0], &[1.0, 2.0]),
            Err(StatsError::InsufficientData(_))
        ));
    }
}
