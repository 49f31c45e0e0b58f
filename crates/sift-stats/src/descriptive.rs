//! Scalar descriptive statistics and the per-column central tendency and
//! dispersion tables.
//!
//! Every function returns `None` when the statistic is undefined for the
//! input (empty slice, variance of a single value).

use schemars::JsonSchema;
use serde::Serialize;
use sift_core::Table;

#[allow(clippy::cast_precision_loss)]
fn len_f64(values: &[f64]) -> f64 {
    values.len() as f64
}

#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / len_f64(values))
}

/// Sample variance (n - 1 denominator).
#[must_use]
pub fn variance(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some(ss / (len_f64(values) - 1.0))
}

/// Sample standard deviation (n - 1 denominator).
#[must_use]
pub fn std_dev(values: &[f64]) -> Option<f64> {
    variance(values).map(f64::sqrt)
}

#[must_use]
pub fn min(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}

#[must_use]
pub fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

/// Ascending copy of `values`.
#[must_use]
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(f64::total_cmp);
    out
}

/// Quantile `q` in `[0, 1]` of already sorted values, linearly
/// interpolated between the two nearest ranks.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - position.floor();
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

#[must_use]
pub fn median(values: &[f64]) -> Option<f64> {
    quantile_sorted(&sorted(values), 0.5)
}

/// Most frequent value; ties go to the smallest.
#[must_use]
pub fn mode(values: &[f64]) -> Option<f64> {
    let sorted = sorted(values);
    let mut best: Option<(f64, usize)> = None;
    let mut index = 0;
    while index < sorted.len() {
        let value = sorted[index];
        let run = sorted[index..].iter().take_while(|&&v| v == value).count();
        if best.is_none_or(|(_, count)| run > count) {
            best = Some((value, run));
        }
        index += run;
    }
    best.map(|(value, _)| value)
}

// ---------------------------------------------------------------------------
// Per-column tables
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct CentralTendency {
    pub column: String,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub mode: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct Dispersion {
    pub column: String,
    pub std: Option<f64>,
    pub var: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Mean, median, and mode of every numeric column.
#[must_use]
pub fn central_tendency(table: &Table) -> Vec<CentralTendency> {
    numeric_columns(table)
        .map(|(column, values)| CentralTendency {
            column,
            mean: mean(&values),
            median: median(&values),
            mode: mode(&values),
        })
        .collect()
}

/// Standard deviation, variance, min, and max of every numeric column.
#[must_use]
pub fn dispersion(table: &Table) -> Vec<Dispersion> {
    numeric_columns(table)
        .map(|(column, values)| Dispersion {
            column,
            std: std_dev(&values),
            var: variance(&values),
            min: min(&values),
            max: max(&values),
        })
        .collect()
}

fn numeric_columns(table: &Table) -> impl Iterator<Item = (String, Vec<f64>)> + '_ {
    table.columns().iter().filter_map(|column| {
        column
            .numeric_values()
            .ok()
            .map(|values| (column.name().to_string(), values))
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use sift_core::Column;

    use super::*;

    fn close(a: Option<f64>, b: f64) -> bool {
        a.is_some_and(|a| (a - b).abs() < 1e-12)
    }

    #[test]
    fn empty_slice_is_undefined() {
        assert_eq!(mean(&[]), None);
        assert_eq!(variance(&[]), None);
        assert_eq!(median(&[]), None);
        assert_eq!(mode(&[]), None);
        assert_eq!(min(&[]), None);
    }

    #[test]
    fn single_value_has_no_spread() {
        assert_eq!(mean(&[4.0]), Some(4.0));
        assert_eq!(std_dev(&[4.0]), None);
    }

    #[test]
    fn sample_variance_uses_n_minus_one() {
        assert!(close(variance(&[1.0, 2.0, 3.0, 4.0, 5.0]), 2.5));
        assert!(close(std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]), 2.138_089_935_299_395));
    }

    #[test]
    fn quantiles_interpolate_linearly() {
        let values = sorted(&[4.0, 1.0, 3.0, 2.0]);
        assert!(close(quantile_sorted(&values, 0.25), 1.75));
        assert!(close(quantile_sorted(&values, 0.5), 2.5));
        assert!(close(quantile_sorted(&values, 0.75), 3.25));
        assert!(close(quantile_sorted(&values, 1.0), 4.0));
    }

    #[test]
    fn mode_prefers_smallest_on_ties() {
        assert_eq!(mode(&[3.0, 1.0, 3.0, 1.0, 2.0]), Some(1.0));
        assert_eq!(mode(&[5.0, 2.0, 5.0]), Some(5.0));
    }

    #[test]
    fn tables_cover_numeric_columns_only() {
        let table = Table::new(vec![
            Column::integers("n", [Some(1), Some(2), Some(2), None]),
            Column::texts("g", [Some("a"), Some("b"), Some("c"), Some("d")]),
        ])
        .unwrap();

        let central = central_tendency(&table);
        assert_eq!(central.len(), 1);
        assert_eq!(central[0].column, "n");
        assert_eq!(central[0].mode, Some(2.0));
        assert_eq!(central[0].median, Some(2.0));

        let spread = dispersion(&table);
        assert_eq!(spread[0].min, Some(1.0));
        assert_eq!(spread[0].max, Some(2.0));
        assert!(close(spread[0].var, 1.0 / 3.0));
    }
}
