//! The tagged record every analysis produces.

use std::fmt;

use schemars::JsonSchema;
use serde::Serialize;

use crate::effect::EffectSize;
use crate::error::StatsError;
use crate::hypothesis::{Anova, TTest};
use crate::normality::NormalityTest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisKind {
    Normality,
    OneSampleTTest,
    TwoSampleTTest,
    PairedTTest,
    OneWayAnova,
    EffectSize,
}

impl AnalysisKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normality => "normality",
            Self::OneSampleTTest => "one_sample_t_test",
            Self::TwoSampleTTest => "two_sample_t_test",
            Self::PairedTTest => "paired_t_test",
            Self::OneWayAnova => "one_way_anova",
            Self::EffectSize => "effect_size",
        }
    }

    /// Display name of the statistical procedure.
    #[must_use]
    pub const fn test_name(self) -> &'static str {
        match self {
            Self::Normality => "Shapiro-Wilk",
            Self::OneSampleTTest => "One-sample t-test",
            Self::TwoSampleTTest => "Two-sample t-test",
            Self::PairedTTest => "Paired t-test",
            Self::OneWayAnova => "One-way ANOVA",
            Self::EffectSize => "Cohen's d",
        }
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Either the statistics of a completed analysis or the reason it failed.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(untagged)]
pub enum Outcome {
    Normality(NormalityTest),
    TTest(TTest),
    Anova(Anova),
    EffectSize(EffectSize),
    Error { error: String },
}

impl From<StatsError> for Outcome {
    fn from(error: StatsError) -> Self {
        Self::Error {
            error: error.to_string(),
        }
    }
}

/// Result of one analysis. Serializes flat: `{kind, test_name, ...statistics}`
/// or `{kind, test_name, error}`.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct TestResult {
    pub kind: AnalysisKind,
    pub test_name: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl TestResult {
    #[must_use]
    pub fn new(kind: AnalysisKind, outcome: Outcome) -> Self {
        Self {
            kind,
            test_name: kind.test_name().to_string(),
            outcome,
        }
    }

    /// Fold an engine result into a result record.
    pub fn from_result<T: Into<Outcome>>(kind: AnalysisKind, result: Result<T, StatsError>) -> Self {
        let outcome = match result {
            Ok(value) => value.into(),
            Err(error) => {
                tracing::debug!(%kind, %error, "analysis failed");
                Outcome::from(error)
            }
        };
        Self::new(kind, outcome)
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Error { error } => Some(error),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.outcome, Outcome::Error { .. })
    }

    /// p-value of a completed test; effect sizes and errors have none.
    #[must_use]
    pub const fn p_value(&self) -> Option<f64> {
        match &self.outcome {
            Outcome::Normality(test) => Some(test.p_value),
            Outcome::TTest(test) => Some(test.p_value),
            Outcome::Anova(test) => Some(test.p_value),
            Outcome::EffectSize(_) | Outcome::Error { .. } => None,
        }
    }
}

impl From<NormalityTest> for Outcome {
    fn from(value: NormalityTest) -> Self {
        Self::Normality(value)
    }
}

impl From<TTest> for Outcome {
    fn from(value: TTest) -> Self {
        Self::TTest(value)
    }
}

impl From<Anova> for Outcome {
    fn from(value: Anova) -> Self {
        Self::Anova(value)
    }
}

impl From<EffectSize> for Outcome {
    fn from(value: EffectSize) -> Self {
        Self::EffectSize(value)
    }
}
