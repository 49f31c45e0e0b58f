//! # sift-stats
//!
//! Statistical engines for Sift. All engines are synchronous, read the
//! [`Table`](sift_core::Table) without mutating it, and report expected
//! failures as [`StatsError`] rather than panicking.
//!
//! - [`summary`]: describe-style numeric and categorical summaries
//! - [`normality`]: Shapiro-Wilk
//! - [`hypothesis`]: one-sample, two-sample, and paired t-tests; one-way ANOVA
//! - [`effect`]: Cohen's d
//! - [`correlation`], [`aggregate`], [`descriptive`]: exploration tables
//! - [`series`]: histogram, Q-Q, scatter, line, box, and bar series for
//!   external plotting
//! - [`session`]: the per-user [`AnalysisSession`] that dispatches
//!   [`AnalysisRequest`]s into [`TestResult`]s

pub mod aggregate;
pub mod correlation;
pub mod descriptive;
pub mod effect;
pub mod error;
pub mod groups;
pub mod hypothesis;
pub mod normality;
pub mod request;
pub mod result;
pub mod series;
pub mod session;
pub mod summary;

/// Significance threshold shared by every test.
pub const ALPHA: f64 = 0.05;

pub use aggregate::{AggFunc, GroupedAggregation, aggregate};
pub use correlation::{CorrelationMatrix, correlation_matrix};
pub use descriptive::{CentralTendency, Dispersion, central_tendency, dispersion};
pub use effect::{EffectMagnitude, EffectSize, cohens_d};
pub use error::StatsError;
pub use hypothesis::{Anova, TTest, one_sample_t, one_way_anova, paired_t, t_test, two_sample_t};
pub use normality::{NormalityTest, shapiro_wilk};
pub use request::AnalysisRequest;
pub use result::{AnalysisKind, Outcome, TestResult};
pub use series::{
    BarChart, BoxPlot, Histogram, QqPlot, XySeries, bar_chart, box_plot, histogram, line, qq_plot,
    scatter,
};
pub use session::AnalysisSession;
pub use summary::{SummaryReport, summarize};
