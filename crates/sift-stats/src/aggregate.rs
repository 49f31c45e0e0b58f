//! Group-by aggregation of one numeric column.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sift_core::Table;

use crate::descriptive::{max, mean, min};
use crate::error::StatsError;
use crate::groups::partition;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AggFunc {
    Mean,
    Sum,
    Count,
    Min,
    Max,
}

impl AggFunc {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mean => "mean",
            Self::Sum => "sum",
            Self::Count => "count",
            Self::Min => "min",
            Self::Max => "max",
        }
    }

    /// Apply to the present values of one group.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn apply(self, values: &[f64]) -> Option<f64> {
        match self {
            Self::Mean => mean(values),
            Self::Sum => Some(values.iter().sum()),
            Self::Count => Some(values.len() as f64),
            Self::Min => min(values),
            Self::Max => max(values),
        }
    }
}

impl fmt::Display for AggFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AggFunc {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mean" => Ok(Self::Mean),
            "sum" => Ok(Self::Sum),
            "count" => Ok(Self::Count),
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            other => Err(format!(
                "unknown aggregation '{other}' (expected mean, sum, count, min, or max)"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct GroupValue {
    pub group: String,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct GroupedAggregation {
    pub value_column: String,
    pub group_column: String,
    pub function: AggFunc,
    pub groups: Vec<GroupValue>,
}

/// Aggregate `value` within each label of `group`, ordered by label.
///
/// # Errors
///
/// `StatsError::Core` if either column is unknown or has the wrong kind.
pub fn aggregate(
    table: &Table,
    value: &str,
    group: &str,
    function: AggFunc,
) -> Result<GroupedAggregation, StatsError> {
    let groups = partition(table, value, group)?
        .into_iter()
        .map(|(label, values)| GroupValue {
            group: label,
            value: function.apply(&values),
        })
        .collect();
    Ok(GroupedAggregation {
        value_column: value.to_string(),
        group_column: group.to_string(),
        function,
        groups,
    })
}
