use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::result::AnalysisKind;

/// One analysis over columns of the session table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "analysis", rename_all = "snake_case")]
pub enum AnalysisRequest {
    /// Shapiro-Wilk on one numeric column.
    Normality { column: String },
    /// Mean of one numeric column against zero.
    OneSampleT { column: String },
    /// Two numeric columns as independent samples.
    TwoSampleT { left: String, right: String },
    /// Two numeric columns as paired samples.
    PairedT { left: String, right: String },
    /// Numeric column split into exactly two groups by a categorical column.
    GroupedT { value: String, group: String },
    /// Numeric column split into groups by a categorical column.
    Anova { value: String, group: String },
    /// Cohen's d between two numeric columns.
    EffectSize { left: String, right: String },
}

impl AnalysisRequest {
    #[must_use]
    pub const fn kind(&self) -> AnalysisKind {
        match self {
            Self::Normality { .. } => AnalysisKind::Normality,
            Self::OneSampleT { .. } => AnalysisKind::OneSampleTTest,
            Self::TwoSampleT { .. } | Self::GroupedT { .. } => AnalysisKind::TwoSampleTTest,
            Self::PairedT { .. } => AnalysisKind::PairedTTest,
            Self::Anova { .. } => AnalysisKind::OneWayAnova,
            Self::EffectSize { .. } => AnalysisKind::EffectSize,
        }
    }
}
