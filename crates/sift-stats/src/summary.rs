//! Describe-style summary of a whole table.

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::Serialize;
use sift_core::{Column, Table};

use crate::descriptive::{max, mean, min, quantile_sorted, sorted, std_dev};

/// Count, mean, std, min, quartiles, and max of one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct NumericSummary {
    pub column: String,
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    #[serde(rename = "25%")]
    pub q25: Option<f64>,
    #[serde(rename = "50%")]
    pub q50: Option<f64>,
    #[serde(rename = "75%")]
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

impl NumericSummary {
    fn from_values(column: String, values: &[f64]) -> Self {
        let ordered = sorted(values);
        Self {
            column,
            count: values.len(),
            mean: mean(values),
            std: std_dev(values),
            min: min(values),
            q25: quantile_sorted(&ordered, 0.25),
            q50: quantile_sorted(&ordered, 0.5),
            q75: quantile_sorted(&ordered, 0.75),
            max: max(values),
        }
    }
}

/// Count, distinct values, and most frequent label of one categorical column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct CategoricalSummary {
    pub column: String,
    pub count: usize,
    pub unique: usize,
    pub top: Option<String>,
    pub freq: Option<usize>,
}

impl CategoricalSummary {
    fn from_labels(column: String, labels: &[Option<String>]) -> Self {
        // Insertion order doubles as the first-seen tie-break.
        let mut order: Vec<(&str, usize)> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for label in labels.iter().flatten().map(String::as_str) {
            match index.get(label) {
                Some(&slot) => order[slot].1 += 1,
                None => {
                    index.insert(label, order.len());
                    order.push((label, 1));
                }
            }
        }

        let mut top: Option<(&str, usize)> = None;
        for &(label, count) in &order {
            if top.is_none_or(|(_, best)| count > best) {
                top = Some((label, count));
            }
        }

        Self {
            column,
            count: order.iter().map(|(_, count)| count).sum(),
            unique: order.len(),
            top: top.map(|(label, _)| label.to_string()),
            freq: top.map(|(_, count)| count),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct MissingCount {
    pub column: String,
    pub missing: usize,
}

/// Numeric and categorical summaries plus a missing count for every column.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct SummaryReport {
    pub numeric_stats: Vec<NumericSummary>,
    pub categorical_stats: Vec<CategoricalSummary>,
    pub missing_counts: Vec<MissingCount>,
}

impl SummaryReport {
    /// Missing count for `column`, if the column exists.
    #[must_use]
    pub fn missing(&self, column: &str) -> Option<usize> {
        self.missing_counts
            .iter()
            .find(|entry| entry.column == column)
            .map(|entry| entry.missing)
    }
}

/// Summarize every column of `table`. Never fails, even with zero rows.
#[must_use]
pub fn summarize(table: &Table) -> SummaryReport {
    let mut numeric_stats = Vec::new();
    let mut categorical_stats = Vec::new();

    for column in table.columns() {
        let name = column.name().to_string();
        if let Ok(values) = column.numeric_values() {
            numeric_stats.push(NumericSummary::from_values(name, &values));
        } else if let Ok(labels) = column.labels() {
            categorical_stats.push(CategoricalSummary::from_labels(name, labels));
        }
    }

    let missing_counts = table
        .columns()
        .iter()
        .map(|column: &Column| MissingCount {
            column: column.name().to_string(),
            missing: column.missing_count(),
        })
        .collect();

    tracing::debug!(
        numeric = numeric_stats.len(),
        categorical = categorical_stats.len(),
        "summarized table"
    );

    SummaryReport {
        numeric_stats,
        categorical_stats,
        missing_counts,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use sift_core::ColumnData;

    use super::*;

    fn table() -> Table {
        Table::new(vec![
            Column::floats("x", [Some(1.0), Some(2.0), None, Some(4.0), Some(5.0)]),
            Column::texts("g", [Some("b"), Some("a"), Some("b"), Some("a"), None]),
            Column::new("flag", ColumnData::Boolean(vec![Some(true), None, None, Some(false), None])),
        ])
        .unwrap()
    }

    #[test]
    fn numeric_summary_matches_describe() {
        let report = summarize(&table());
        let x = &report.numeric_stats[0];
        assert_eq!(x.count, 4);
        assert_eq!(x.mean, Some(3.0));
        assert_eq!(x.min, Some(1.0));
        assert_eq!(x.q25, Some(1.75));
        assert_eq!(x.q50, Some(3.0));
        assert_eq!(x.q75, Some(4.25));
        assert_eq!(x.max, Some(5.0));
        let std = x.std.unwrap();
        assert!((std - (10.0_f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn top_label_ties_go_to_first_seen() {
        let report = summarize(&table());
        assert_eq!(
            report.categorical_stats,
            vec![CategoricalSummary {
                column: "g".into(),
                count: 4,
                unique: 2,
                top: Some("b".into()),
                freq: Some(2),
            }]
        );
    }

    #[test]
    fn missing_counts_cover_every_column() {
        let report = summarize(&table());
        assert_eq!(report.missing("x"), Some(1));
        assert_eq!(report.missing("g"), Some(1));
        assert_eq!(report.missing("flag"), Some(3));
        assert_eq!(report.missing("nope"), None);
    }

    #[test]
    fn zero_rows_do_not_fail() {
        let table = Table::new(vec![
            Column::floats("x", []),
            Column::texts::<String>("g", []),
        ])
        .unwrap();
        let report = summarize(&table);
        let x = &report.numeric_stats[0];
        assert_eq!(x.count, 0);
        assert_eq!(x.mean, None);
        assert_eq!(x.std, None);
        assert_eq!(x.q50, None);
        assert_eq!(report.categorical_stats[0].top, None);
        assert_eq!(report.missing("x"), Some(0));
    }

    #[test]
    fn no_numeric_columns_gives_empty_stats() {
        let table = Table::new(vec![Column::texts("g", [Some("a")])]).unwrap();
        assert!(summarize(&table).numeric_stats.is_empty());
    }

    #[test]
    fn quartile_keys_serialize_as_percentages() {
        let json = serde_json::to_value(summarize(&table())).unwrap();
        assert_eq!(json["numeric_stats"][0]["25%"], 1.75);
        assert!(json["numeric_stats"][0].get("q25").is_none());
    }
}
