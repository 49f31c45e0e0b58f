//! Shapiro-Wilk normality test.
//!
//! Coefficients and the p-value follow Royston's 1995 approximation
//! (algorithm AS R94), valid for 3 <= n <= 5000.

use std::f64::consts::PI;

use schemars::JsonSchema;
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};

use crate::ALPHA;
use crate::descriptive::sorted;
use crate::error::StatsError;

const MAX_EXACT_N: usize = 5000;

const C1: [f64; 6] = [0.0, 0.221_157, -0.147_981, -2.071_190, 4.434_685, -2.706_056];
const C2: [f64; 6] = [0.0, 0.042_981, -0.293_762, -1.752_461, 5.682_633, -3.582_633];
const C3: [f64; 4] = [0.544, -0.399_78, 0.025_054, -6.714e-4];
const C4: [f64; 4] = [1.3822, -0.778_57, 0.062_767, -0.002_032_2];
const C5: [f64; 4] = [-1.5861, -0.310_82, -0.083_751, 0.003_891_5];
const C6: [f64; 3] = [-0.4803, -0.082_676, 0.003_030_2];
const G: [f64; 2] = [-2.273, 0.459];

/// Smallest p-value reported when `ln(1 - W)` falls outside the
/// small-sample approximation.
const P_FLOOR: f64 = 1e-99;

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct NormalityTest {
    pub statistic: f64,
    pub p_value: f64,
    pub is_normal: bool,
    pub n: usize,
}

pub(crate) fn standard_normal() -> Result<Normal, StatsError> {
    Normal::new(0.0, 1.0).map_err(StatsError::distribution)
}

/// Polynomial with ascending coefficients.
fn poly(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, c| acc.mul_add(x, *c))
}

/// Antisymmetric coefficients `a_1..a_{n/2}` for the lower half of the
/// ordered sample (sign dropped; only the square of the sum is used).
#[allow(clippy::cast_precision_loss)]
fn coefficients(n: usize, normal: &Normal) -> Vec<f64> {
    if n == 3 {
        return vec![std::f64::consts::FRAC_1_SQRT_2];
    }
    let half = n / 2;
    let an = n as f64;
    let m: Vec<f64> = (1..=half)
        .map(|i| normal.inverse_cdf((i as f64 - 0.375) / (an + 0.25)))
        .collect();
    let summ2 = 2.0 * m.iter().map(|v| v * v).sum::<f64>();
    let ssumm2 = summ2.sqrt();
    let rsn = 1.0 / an.sqrt();
    let a1 = poly(&C1, rsn) - m[0] / ssumm2;

    let (mut a, fac) = if n > 5 {
        let a2 = -m[1] / ssumm2 + poly(&C2, rsn);
        let fac = ((summ2 - 2.0 * m[0].powi(2) - 2.0 * m[1].powi(2))
            / (1.0 - 2.0 * a1.powi(2) - 2.0 * a2.powi(2)))
        .sqrt();
        (vec![a1, a2], fac)
    } else {
        let fac = ((summ2 - 2.0 * m[0].powi(2)) / (1.0 - 2.0 * a1.powi(2))).sqrt();
        (vec![a1], fac)
    };
    let fixed = a.len();
    a.extend(m[fixed..].iter().map(|mi| -mi / fac));
    a.into_iter().map(f64::abs).collect()
}

#[allow(clippy::cast_precision_loss)]
fn p_value(w: f64, n: usize, normal: &Normal) -> f64 {
    if n == 3 {
        return ((6.0 / PI) * (w.sqrt().asin() - PI / 3.0)).max(0.0);
    }
    let an = n as f64;
    let w1 = (1.0 - w).ln();
    let (y, mu, sigma) = if n <= 11 {
        let gamma = poly(&G, an);
        if w1 >= gamma {
            return P_FLOOR;
        }
        (-(gamma - w1).ln(), poly(&C3, an), poly(&C4, an).exp())
    } else {
        let ln_n = an.ln();
        (w1, poly(&C5, ln_n), poly(&C6, ln_n).exp())
    };
    normal.sf((y - mu) / sigma)
}

/// Run the Shapiro-Wilk test on `sample`. `is_normal` is `p_value > ALPHA`.
///
/// # Errors
///
/// `StatsError::InsufficientData` below three values, `StatsError::NonFinite`
/// for infinite or NaN values, `StatsError::Degenerate` when every value is
/// identical.
#[allow(clippy::cast_precision_loss)]
pub fn shapiro_wilk(sample: &[f64]) -> Result<NormalityTest, StatsError> {
    let n = sample.len();
    if n < 3 {
        return Err(StatsError::insufficient(format!(
            "Shapiro-Wilk needs at least 3 values, got {n}"
        )));
    }
    StatsError::ensure_finite(sample, "sample")?;
    if n > MAX_EXACT_N {
        tracing::warn!(n, "Shapiro-Wilk p-value may be inaccurate above 5000 values");
    }

    let x = sorted(sample);
    let range = x[n - 1] - x[0];
    if range <= f64::EPSILON * x[0].abs().max(1.0) {
        return Err(StatsError::degenerate("all values are identical"));
    }

    let normal = standard_normal()?;
    let a = coefficients(n, &normal);

    let numerator: f64 = a
        .iter()
        .enumerate()
        .map(|(i, coefficient)| coefficient * (x[n - 1 - i] - x[i]))
        .sum();
    let mean = x.iter().sum::<f64>() / x.len() as f64;
    let ss: f64 = x.iter().map(|v| (v - mean).powi(2)).sum();
    let w = (numerator.powi(2) / ss).min(1.0);
    let p = p_value(w, n, &normal);

    tracing::debug!(n, statistic = w, p_value = p, "shapiro-wilk");
    Ok(NormalityTest {
        statistic: w,
        p_value: p,
        is_normal: p > ALPHA,
        n,
    })
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand_distr::{Distribution, Normal as Gaussian};
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(&[1.0, 2.0, 3.0, 4.0, 5.0], 0.986_762_155_4, 0.967_173_936)]
    #[case(&[1.0, 2.0, 4.0], 0.964_286, 0.636_887)]
    #[case(
        &[148.0, 154.0, 158.0, 160.0, 161.0, 162.0, 166.0, 170.0, 182.0, 195.0, 236.0],
        0.788_81,
        0.006_703_8
    )]
    #[case(&[2.1, 3.4, 1.9, 5.6, 4.4, 3.3, 2.8, 4.1, 3.9, 3.0], 0.971_39, 0.903_43)]
    fn matches_reference_values(#[case] sample: &[f64], #[case] w: f64, #[case] p: f64) {
        let result = shapiro_wilk(sample).unwrap();
        assert!((result.statistic - w).abs() < 1e-4, "W = {}", result.statistic);
        assert!((result.p_value - p).abs() < 1e-3, "p = {}", result.p_value);
    }

    #[test]
    fn large_sample_branch() {
        let sample: Vec<f64> = (1..=30).map(f64::from).collect();
        let result = shapiro_wilk(&sample).unwrap();
        assert!((result.statistic - 0.957_45).abs() < 1e-4);
        assert!((result.p_value - 0.266_23).abs() < 1e-3);
        assert!(result.is_normal);
    }

    #[test]
    fn skewed_sample_is_not_normal() {
        let sample = [148.0, 154.0, 158.0, 160.0, 161.0, 162.0, 166.0, 170.0, 182.0, 195.0, 236.0];
        assert!(!shapiro_wilk(&sample).unwrap().is_normal);
    }

    #[test]
    fn too_few_values() {
        assert!(matches!(
            shapiro_wilk(&[1.0, 2.0]),
            Err(StatsError::InsufficientData(_))
        ));
    }

    #[test]
    fn infinite_value_is_rejected() {
        assert!(matches!(
            shapiro_wilk(&[1.0, f64::INFINITY, 3.0, 4.0]),
            Err(StatsError::NonFinite(_))
        ));
    }

    #[test]
    fn identical_values_are_degenerate() {
        assert!(matches!(
            shapiro_wilk(&[3.0, 3.0, 3.0, 3.0]),
            Err(StatsError::Degenerate(_))
        ));
    }

    #[test]
    fn seeded_normal_samples_usually_pass() {
        let dist = Gaussian::new(10.0, 2.0).unwrap();
        let passes = (0..20_u64)
            .filter(|&seed| {
                let mut rng = StdRng::seed_from_u64(seed);
                let sample: Vec<f64> = (0..50).map(|_| dist.sample(&mut rng)).collect();
                shapiro_wilk(&sample).unwrap().p_value > ALPHA
            })
            .count();
        assert!(passes >= 15, "only {passes} of 20 normal samples passed");
    }

    #[test]
    fn statistic_is_order_independent() {
        let forward = shapiro_wilk(&[1.0, 2.0, 3.0, 4.0, 5.0, 7.0]).unwrap();
        let shuffled = shapiro_wilk(&[7.0, 3.0, 1.0, 5.0, 2.0, 4.0]).unwrap();
        assert_eq!(forward, shuffled);
    }
}
