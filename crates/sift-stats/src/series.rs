//! Plot-ready series: histogram bins, normal Q-Q points, x/y points for
//! scatter and line charts, box plot statistics, and bar heights.

use schemars::JsonSchema;
use serde::Serialize;
use sift_core::Table;
use statrs::distribution::ContinuousCDF;

use crate::descriptive::{max, min, quantile_sorted, sorted};
use crate::error::StatsError;
use crate::groups::{complete_rows, partition};
use crate::normality::standard_normal;

pub const MIN_BINS: usize = 5;
pub const MAX_BINS: usize = 100;

const QQ_LOW: f64 = 0.01;
const QQ_HIGH: f64 = 0.99;

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct Histogram {
    pub column: String,
    pub bins: Vec<HistogramBin>,
}

/// Equal-width bins over `[min, max]`; the last bin is closed on the right.
/// `bins` is clamped to `MIN_BINS..=MAX_BINS`.
///
/// # Errors
///
/// `StatsError::InsufficientData` when `values` is empty,
/// `StatsError::NonFinite` for infinite or NaN values.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn histogram(column: &str, values: &[f64], bins: usize) -> Result<Histogram, StatsError> {
    StatsError::ensure_finite(values, column)?;
    let (Some(lo), Some(hi)) = (min(values), max(values)) else {
        return Err(StatsError::insufficient("histogram needs at least one value"));
    };
    let bins = bins.clamp(MIN_BINS, MAX_BINS);
    let (lo, hi) = if lo == hi { (lo - 0.5, hi + 0.5) } else { (lo, hi) };
    let width = (hi - lo) / bins as f64;

    let mut counts = vec![0_usize; bins];
    for value in values {
        let index = (((value - lo) / width).floor() as usize).min(bins - 1);
        counts[index] += 1;
    }

    let bins = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: (i as f64).mul_add(width, lo),
            upper: if i + 1 == bins { hi } else { ((i + 1) as f64).mul_add(width, lo) },
            count,
        })
        .collect();
    Ok(Histogram {
        column: column.to_string(),
        bins,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct QqPoint {
    pub sample: f64,
    pub theoretical: f64,
}

/// Dashed reference line from `(min, z(0.01))` to `(max, z(0.99))`.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct ReferenceLine {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct QqPlot {
    pub column: String,
    pub points: Vec<QqPoint>,
    pub reference: ReferenceLine,
}

/// Sorted sample against standard normal quantiles at evenly spaced
/// probabilities in `[0.01, 0.99]`.
///
/// # Errors
///
/// `StatsError::InsufficientData` when `values` is empty.
#[allow(clippy::cast_precision_loss)]
pub fn qq_plot(column: &str, values: &[f64]) -> Result<QqPlot, StatsError> {
    StatsError::ensure_finite(values, column)?;
    let ordered = sorted(values);
    let (Some(&first), Some(&last)) = (ordered.first(), ordered.last()) else {
        return Err(StatsError::insufficient("Q-Q plot needs at least one value"));
    };
    let normal = standard_normal()?;
    let n = ordered.len();
    let step = if n > 1 { (QQ_HIGH - QQ_LOW) / (n - 1) as f64 } else { 0.0 };

    let points = ordered
        .iter()
        .enumerate()
        .map(|(i, &sample)| QqPoint {
            sample,
            theoretical: normal.inverse_cdf((i as f64).mul_add(step, QQ_LOW)),
        })
        .collect();
    Ok(QqPlot {
        column: column.to_string(),
        points,
        reference: ReferenceLine {
            x0: first,
            y0: normal.inverse_cdf(QQ_LOW),
            x1: last,
            y1: normal.inverse_cdf(QQ_HIGH),
        },
    })
}

// ---------------------------------------------------------------------------
// Scatter and line
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum XyKind {
    Scatter,
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct XyPoint {
    pub x: f64,
    pub y: f64,
    /// Label of the colour column on this row; absent when no colour column
    /// was requested or the label is missing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct XySeries {
    pub kind: XyKind,
    pub x_column: String,
    pub y_column: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_column: Option<String>,
    pub points: Vec<XyPoint>,
}

fn xy_series(
    kind: XyKind,
    table: &Table,
    x: &str,
    y: &str,
    color: Option<&str>,
) -> Result<XySeries, StatsError> {
    let rows = complete_rows(table, x, y)?;
    let labels = color.map(|name| table.column(name)?.labels()).transpose()?;
    if rows.is_empty() {
        return Err(StatsError::insufficient(format!(
            "no rows with both '{x}' and '{y}' present"
        )));
    }

    let points: Vec<XyPoint> = rows
        .into_iter()
        .map(|(row, x_value, y_value)| XyPoint {
            x: x_value,
            y: y_value,
            color: labels.as_ref().and_then(|labels| labels[row].clone()),
        })
        .collect();
    if points.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
        return Err(StatsError::NonFinite(format!("'{x}' or '{y}'")));
    }
    Ok(XySeries {
        kind,
        x_column: x.to_string(),
        y_column: y.to_string(),
        color_column: color.map(str::to_string),
        points,
    })
}

/// Points `(x, y)` for every row where both numeric columns are present, in
/// row order, optionally labelled by a categorical `color` column.
///
/// # Errors
///
/// `StatsError::Core` for unknown or wrongly typed columns,
/// `StatsError::InsufficientData` when no row is complete,
/// `StatsError::NonFinite` for infinite values.
pub fn scatter(table: &Table, x: &str, y: &str, color: Option<&str>) -> Result<XySeries, StatsError> {
    xy_series(XyKind::Scatter, table, x, y, color)
}

/// Line chart points: as [`scatter`] without colour, in row order.
///
/// # Errors
///
/// As [`scatter`].
pub fn line(table: &Table, x: &str, y: &str) -> Result<XySeries, StatsError> {
    xy_series(XyKind::Line, table, x, y, None)
}

// ---------------------------------------------------------------------------
// Box plot
// ---------------------------------------------------------------------------

/// Tukey box of one group. Whiskers reach the most extreme values within
/// 1.5 IQR of the quartiles; values beyond them are outliers.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct BoxStats {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub count: usize,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

impl BoxStats {
    /// `None` for an empty group.
    fn from_values(group: Option<String>, values: &[f64]) -> Option<Self> {
        let ordered = sorted(values);
        let q1 = quantile_sorted(&ordered, 0.25)?;
        let median = quantile_sorted(&ordered, 0.5)?;
        let q3 = quantile_sorted(&ordered, 0.75)?;
        let reach = 1.5 * (q3 - q1);
        let (low_fence, high_fence) = (q1 - reach, q3 + reach);

        Some(Self {
            group,
            count: ordered.len(),
            q1,
            median,
            q3,
            lower_whisker: ordered.iter().copied().find(|v| *v >= low_fence).unwrap_or(q1),
            upper_whisker: ordered.iter().copied().rfind(|v| *v <= high_fence).unwrap_or(q3),
            outliers: ordered
                .iter()
                .copied()
                .filter(|v| *v < low_fence || *v > high_fence)
                .collect(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct BoxPlot {
    pub column: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_column: Option<String>,
    pub boxes: Vec<BoxStats>,
}

/// One box for `column`, or one per label of `group` ordered by label.
/// Groups without values get no box.
///
/// # Errors
///
/// `StatsError::Core` for unknown or wrongly typed columns,
/// `StatsError::NonFinite` for infinite values,
/// `StatsError::InsufficientData` when no box has values.
pub fn box_plot(table: &Table, column: &str, group: Option<&str>) -> Result<BoxPlot, StatsError> {
    let groups: Vec<(Option<String>, Vec<f64>)> = match group {
        Some(group) => partition(table, column, group)?
            .into_iter()
            .map(|(label, values)| (Some(label), values))
            .collect(),
        None => vec![(None, table.column(column)?.numeric_values()?)],
    };
    for (_, values) in &groups {
        StatsError::ensure_finite(values, column)?;
    }

    let boxes: Vec<BoxStats> = groups
        .into_iter()
        .filter_map(|(label, values)| BoxStats::from_values(label, &values))
        .collect();
    if boxes.is_empty() {
        return Err(StatsError::insufficient(format!("'{column}' has no values")));
    }
    Ok(BoxPlot {
        column: column.to_string(),
        group_column: group.map(str::to_string),
        boxes,
    })
}

// ---------------------------------------------------------------------------
// Bar chart
// ---------------------------------------------------------------------------

/// Bar height is the sum of the `y` values in the category; `count` is how
/// many rows were stacked into it.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct BarChart {
    pub x_column: String,
    pub y_column: String,
    pub bars: Vec<Bar>,
}

/// Stack numeric `y` by the labels of categorical `x`, ordered by label.
/// Labels with no present `y` value get no bar.
///
/// # Errors
///
/// `StatsError::Core` for unknown or wrongly typed columns,
/// `StatsError::NonFinite` for infinite values,
/// `StatsError::InsufficientData` when no bar has values.
pub fn bar_chart(table: &Table, x: &str, y: &str) -> Result<BarChart, StatsError> {
    let groups = partition(table, y, x)?;
    let mut bars = Vec::with_capacity(groups.len());
    for (label, values) in groups {
        if values.is_empty() {
            continue;
        }
        StatsError::ensure_finite(&values, y)?;
        bars.push(Bar {
            label,
            value: values.iter().sum(),
            count: values.len(),
        });
    }
    if bars.is_empty() {
        return Err(StatsError::insufficient(format!(
            "no '{y}' values to stack by '{x}'"
        )));
    }
    Ok(BarChart {
        x_column: x.to_string(),
        y_column: y.to_string(),
        bars,
    })
}
