//! Student t-tests and one-way ANOVA.

use schemars::JsonSchema;
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, FisherSnedecor, StudentsT};

use crate::ALPHA;
use crate::descriptive::{mean, variance};
use crate::error::StatsError;

/// Outcome of any t-test. `significant` is `p_value < ALPHA`.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct TTest {
    pub statistic: f64,
    pub p_value: f64,
    pub df: f64,
    pub significant: bool,
}

impl TTest {
    fn from_statistic(statistic: f64, df: f64) -> Result<Self, StatsError> {
        if !statistic.is_finite() {
            return Err(StatsError::degenerate("t statistic is not finite"));
        }
        let dist = StudentsT::new(0.0, 1.0, df).map_err(StatsError::distribution)?;
        let p_value = (2.0 * dist.sf(statistic.abs())).min(1.0);
        Ok(Self {
            statistic,
            p_value,
            df,
            significant: p_value < ALPHA,
        })
    }
}

/// Outcome of a one-way ANOVA. `significant` is `p_value < ALPHA`.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct Anova {
    pub f_statistic: f64,
    pub p_value: f64,
    pub df_between: f64,
    pub df_within: f64,
    pub significant: bool,
}

#[allow(clippy::cast_precision_loss)]
fn len_f64(values: &[f64]) -> f64 {
    values.len() as f64
}

fn require(values: &[f64], label: &str) -> Result<(), StatsError> {
    if values.len() < 2 {
        return Err(StatsError::insufficient(format!(
            "{label} needs at least 2 values, got {}",
            values.len()
        )));
    }
    Ok(())
}

/// Test whether the mean of `sample` differs from zero.
///
/// # Errors
///
/// `InsufficientData` below two values; `NonFinite` for infinite or NaN
/// values; `Degenerate` for zero variance.
pub fn one_sample_t(sample: &[f64]) -> Result<TTest, StatsError> {
    require(sample, "sample")?;
    StatsError::ensure_finite(sample, "sample")?;
    let n = len_f64(sample);
    let (Some(m), Some(var)) = (mean(sample), variance(sample)) else {
        return Err(StatsError::insufficient("sample is empty"));
    };
    if var == 0.0 {
        return Err(StatsError::degenerate("sample has zero variance"));
    }
    let statistic = m / (var / n).sqrt();
    tracing::debug!(n = sample.len(), statistic, "one-sample t-test");
    TTest::from_statistic(statistic, n - 1.0)
}

/// Independent two-sample Student t-test with pooled variance.
///
/// # Errors
///
/// `InsufficientData` when either sample has fewer than two values;
/// `Degenerate` when the pooled variance is zero.
pub fn two_sample_t(left: &[f64], right: &[f64]) -> Result<TTest, StatsError> {
    require(left, "first sample")?;
    require(right, "second sample")?;
    StatsError::ensure_finite(left, "first sample")?;
    StatsError::ensure_finite(right, "second sample")?;
    let (n1, n2) = (len_f64(left), len_f64(right));
    let (Some(m1), Some(m2), Some(v1), Some(v2)) =
        (mean(left), mean(right), variance(left), variance(right))
    else {
        return Err(StatsError::insufficient("sample is empty"));
    };
    let df = n1 + n2 - 2.0;
    let pooled = ((n1 - 1.0) * v1 + (n2 - 1.0) * v2) / df;
    if pooled == 0.0 {
        return Err(StatsError::degenerate("both samples have zero variance"));
    }
    let statistic = (m1 - m2) / (pooled * (1.0 / n1 + 1.0 / n2)).sqrt();
    tracing::debug!(n1 = left.len(), n2 = right.len(), statistic, "two-sample t-test");
    TTest::from_statistic(statistic, df)
}

/// Paired t-test on the element-wise differences `left - right`.
///
/// # Errors
///
/// `LengthMismatch` when the samples differ in length, otherwise as
/// [`one_sample_t`] on the differences.
pub fn paired_t(left: &[f64], right: &[f64]) -> Result<TTest, StatsError> {
    if left.len() != right.len() {
        return Err(StatsError::LengthMismatch {
            left: left.len(),
            right: right.len(),
        });
    }
    let differences: Vec<f64> = left.iter().zip(right).map(|(a, b)| a - b).collect();
    one_sample_t(&differences)
}

/// One-sample test when `right` is `None`, otherwise a paired or
/// independent two-sample test.
///
/// # Errors
///
/// As the selected test.
pub fn t_test(left: &[f64], right: Option<&[f64]>, paired: bool) -> Result<TTest, StatsError> {
    match (right, paired) {
        (None, _) => one_sample_t(left),
        (Some(right), true) => paired_t(left, right),
        (Some(right), false) => two_sample_t(left, right),
    }
}

/// One-way ANOVA across `groups`. Empty groups are ignored.
///
/// # Errors
///
/// `InsufficientData` with fewer than two non-empty groups or no residual
/// degrees of freedom; `Degenerate` when the within-group variance is zero.
pub fn one_way_anova<G: AsRef<[f64]>>(groups: &[G]) -> Result<Anova, StatsError> {
    let groups: Vec<&[f64]> = groups
        .iter()
        .map(AsRef::<[f64]>::as_ref)
        .filter(|group| !group.is_empty())
        .collect();
    if groups.len() < 2 {
        return Err(StatsError::insufficient(format!(
            "ANOVA needs at least 2 non-empty groups, got {}",
            groups.len()
        )));
    }

    for group in &groups {
        StatsError::ensure_finite(group, "group values")?;
    }

    let total: usize = groups.iter().map(|group| group.len()).sum();
    let all: Vec<f64> = groups.iter().flat_map(|group| group.iter().copied()).collect();
    let grand = mean(&all).unwrap_or_default();

    let mut ss_between = 0.0;
    let mut ss_within = 0.0;
    for group in &groups {
        let m = mean(group).unwrap_or_default();
        ss_between += len_f64(group) * (m - grand).powi(2);
        ss_within += group.iter().map(|v| (v - m).powi(2)).sum::<f64>();
    }

    #[allow(clippy::cast_precision_loss)]
    let (df_between, df_within) = (
        groups.len() as f64 - 1.0,
        (total - groups.len()) as f64,
    );
    if df_within == 0.0 {
        return Err(StatsError::insufficient(
            "ANOVA needs more values than groups",
        ));
    }
    if ss_within == 0.0 {
        return Err(StatsError::degenerate("within-group variance is zero"));
    }

    let f_statistic = (ss_between / df_between) / (ss_within / df_within);
    if !f_statistic.is_finite() {
        return Err(StatsError::degenerate("F statistic is not finite"));
    }
    let dist = FisherSnedecor::new(df_between, df_within).map_err(StatsError::distribution)?;
    let p_value = dist.sf(f_statistic);
    tracing::debug!(groups = groups.len(), f_statistic, "one-way anova");

    Ok(Anova {
        f_statistic,
        p_value,
        df_between,
        df_within,
        significant: p_value < ALPHA,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-8,
            "expected {expected}, got {actual}"
        );
    }

    // -----------------------------------------------------------------------
    // t-tests
    // -----------------------------------------------------------------------

    #[test]
    fn one_sample_against_zero() {
        let result = one_sample_t(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_close(result.statistic, 4.242_640_687);
        assert_close(result.p_value, 0.013_235_599_6);
        assert_close(result.df, 4.0);
        assert!(result.significant);
    }

    #[test]
    fn one_sample_needs_two_values() {
        assert!(matches!(
            one_sample_t(&[1.0]),
            Err(StatsError::InsufficientData(_))
        ));
    }

    #[test]
    fn one_sample_constant_is_degenerate() {
        assert!(matches!(
            one_sample_t(&[2.0, 2.0, 2.0]),
            Err(StatsError::Degenerate(_))
        ));
    }

    #[test]
    fn pooled_two_sample() {
        let result = two_sample_t(&[1.0, 2.0], &[3.0, 4.0, 5.0]).unwrap();
        assert_close(result.statistic, -3.0);
        assert_close(result.df, 3.0);
        assert_close(result.p_value, 0.057_668_885_6);
        assert!(!result.significant);
    }

    #[test]
    fn two_sample_swaps_sign() {
        let ab = two_sample_t(&[1.0, 2.0], &[3.0, 4.0, 5.0]).unwrap();
        let ba = two_sample_t(&[3.0, 4.0, 5.0], &[1.0, 2.0]).unwrap();
        assert_close(ab.statistic, -ba.statistic);
        assert_close(ab.p_value, ba.p_value);
    }

    #[test]
    fn paired_uses_differences() {
        let result = paired_t(&[1.0, 2.0, 3.0, 4.0, 5.0], &[2.0, 4.0, 5.0, 4.0, 7.0]).unwrap();
        assert_close(result.statistic, -3.5);
        assert_close(result.p_value, 0.024_896_163_5);
    }

    #[test]
    fn paired_requires_equal_lengths() {
        assert_eq!(
            paired_t(&[1.0, 2.0, 3.0], &[1.0, 2.0]).unwrap_err(),
            StatsError::LengthMismatch { left: 3, right: 2 }
        );
    }

    #[test]
    fn t_test_selects_variant() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        let b = [2.0, 4.0, 5.0, 4.0, 7.0];
        assert_eq!(t_test(&a, None, false).unwrap(), one_sample_t(&a).unwrap());
        assert_eq!(t_test(&a, Some(&b), true).unwrap(), paired_t(&a, &b).unwrap());
        assert_eq!(t_test(&a, Some(&b), false).unwrap(), two_sample_t(&a, &b).unwrap());
    }

    // -----------------------------------------------------------------------
    // ANOVA
    // -----------------------------------------------------------------------

    #[test]
    fn anova_three_groups() {
        let result = one_way_anova(&[
            vec![1.0, 2.0, 3.0],
            vec![4.0, 5.0, 6.0],
            vec![7.0, 8.0, 9.0],
        ])
        .unwrap();
        assert_close(result.f_statistic, 27.0);
        assert_close(result.p_value, 0.001);
        assert_close(result.df_between, 2.0);
        assert_close(result.df_within, 6.0);
        assert!(result.significant);
    }

    #[test]
    fn anova_unequal_groups() {
        let result = one_way_anova(&[
            vec![4.2, 5.1, 3.9, 4.8],
            vec![5.0, 5.5, 4.9],
            vec![6.1, 5.8, 6.4, 6.0, 5.7],
        ])
        .unwrap();
        assert_close(result.f_statistic, 16.283_175_355_45);
        assert!((result.p_value - 0.001_022_710_59).abs() < 1e-7);
    }

    #[test]
    fn anova_single_group_is_an_error() {
        assert!(matches!(
            one_way_anova(&[vec![1.0, 2.0, 3.0], vec![]]),
            Err(StatsError::InsufficientData(_))
        ));
    }

    #[test]
    fn anova_identical_values_is_an_error() {
        assert!(matches!(
            one_way_anova(&[vec![2.0, 2.0], vec![2.0, 2.0]]),
            Err(StatsError::Degenerate(_))
        ));
    }

    #[test]
    fn infinite_values_are_rejected_not_panicking() {
        let with_inf = [1.0, f64::INFINITY, 3.0, 4.0];
        let plain = [1.0, 2.0, 2.5, 7.0];
        assert!(matches!(one_sample_t(&with_inf), Err(StatsError::NonFinite(_))));
        assert!(matches!(two_sample_t(&plain, &with_inf), Err(StatsError::NonFinite(_))));
        assert!(matches!(paired_t(&with_inf, &plain), Err(StatsError::NonFinite(_))));
        assert!(matches!(
            one_way_anova(&[vec![1.0, f64::NEG_INFINITY], vec![3.0, 4.0]]),
            Err(StatsError::NonFinite(_))
        ));
        assert!(matches!(one_sample_t(&[1.0, f64::NAN, 2.0]), Err(StatsError::NonFinite(_))));
    }

    #[test]
    fn anova_singleton_groups_have_no_residual() {
        assert!(matches!(
            one_way_anova(&[vec![1.0], vec![2.0]]),
            Err(StatsError::InsufficientData(_))
        ));
    }
}
