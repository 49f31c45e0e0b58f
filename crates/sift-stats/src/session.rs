//! Session-scoped analysis context.
//!
//! An [`AnalysisSession`] owns the currently loaded table and the id of the
//! stored dataset it came from, if any. Each caller holds its own session;
//! nothing here is process-wide.

use sift_core::{CoreError, Table};

use crate::effect::cohens_d;
use crate::error::StatsError;
use crate::groups::{complete_rows, partition};
use crate::hypothesis::{one_sample_t, one_way_anova, paired_t, two_sample_t};
use crate::normality::shapiro_wilk;
use crate::request::AnalysisRequest;
use crate::result::TestResult;

#[derive(Debug, Clone, Default)]
pub struct AnalysisSession {
    table: Option<Table>,
    dataset_id: Option<i64>,
}

impl AnalysisSession {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            table: None,
            dataset_id: None,
        }
    }

    /// Replace the current table wholesale.
    pub fn load(&mut self, table: Table, dataset_id: Option<i64>) {
        tracing::debug!(
            rows = table.row_count(),
            columns = table.column_count(),
            ?dataset_id,
            "session table replaced"
        );
        self.table = Some(table);
        self.dataset_id = dataset_id;
    }

    /// The current table.
    ///
    /// # Errors
    ///
    /// `CoreError::NoData` when nothing has been loaded.
    pub fn table(&self) -> Result<&Table, CoreError> {
        self.table.as_ref().ok_or(CoreError::NoData)
    }

    /// Mutable access for in-place edits such as re-declaring a category.
    ///
    /// # Errors
    ///
    /// `CoreError::NoData` when nothing has been loaded.
    pub fn table_mut(&mut self) -> Result<&mut Table, CoreError> {
        self.table.as_mut().ok_or(CoreError::NoData)
    }

    #[must_use]
    pub const fn dataset_id(&self) -> Option<i64> {
        self.dataset_id
    }

    /// Run one analysis. Failures come back as the error variant of
    /// [`TestResult`], never as a panic or `Err`.
    #[must_use]
    pub fn run(&self, request: &AnalysisRequest) -> TestResult {
        let kind = request.kind();
        match request {
            AnalysisRequest::Normality { column } => {
                TestResult::from_result(kind, self.values(column).and_then(|v| shapiro_wilk(&v)))
            }
            AnalysisRequest::OneSampleT { column } => {
                TestResult::from_result(kind, self.values(column).and_then(|v| one_sample_t(&v)))
            }
            AnalysisRequest::TwoSampleT { left, right } => TestResult::from_result(
                kind,
                self.pair(left, right).and_then(|(a, b)| two_sample_t(&a, &b)),
            ),
            AnalysisRequest::PairedT { left, right } => TestResult::from_result(
                kind,
                self.matched(left, right).and_then(|(a, b)| paired_t(&a, &b)),
            ),
            AnalysisRequest::GroupedT { value, group } => {
                TestResult::from_result(kind, self.grouped_t(value, group))
            }
            AnalysisRequest::Anova { value, group } => TestResult::from_result(
                kind,
                self.groups(value, group)
                    .and_then(|groups| one_way_anova(&groups)),
            ),
            AnalysisRequest::EffectSize { left, right } => TestResult::from_result(
                kind,
                self.pair(left, right).and_then(|(a, b)| cohens_d(&a, &b)),
            ),
        }
    }

    /// Present values of one numeric column.
    fn values(&self, column: &str) -> Result<Vec<f64>, StatsError> {
        Ok(self.table()?.column(column)?.numeric_values()?)
    }

    /// Present values of two numeric columns, each dropping its own missing cells.
    fn pair(&self, left: &str, right: &str) -> Result<(Vec<f64>, Vec<f64>), StatsError> {
        Ok((self.values(left)?, self.values(right)?))
    }

    /// Values of two numeric columns from the rows where both are present.
    fn matched(&self, left: &str, right: &str) -> Result<(Vec<f64>, Vec<f64>), StatsError> {
        Ok(complete_rows(self.table()?, left, right)?
            .into_iter()
            .map(|(_, a, b)| (a, b))
            .unzip())
    }

    fn groups(&self, value: &str, group: &str) -> Result<Vec<Vec<f64>>, StatsError> {
        Ok(partition(self.table()?, value, group)?.into_values().collect())
    }

    fn grouped_t(&self, value: &str, group: &str) -> Result<crate::hypothesis::TTest, StatsError> {
        let groups: Vec<Vec<f64>> = self
            .groups(value, group)?
            .into_iter()
            .filter(|values| !values.is_empty())
            .collect();
        match groups.as_slice() {
            [first, second] => two_sample_t(first, second),
            other => Err(StatsError::insufficient(format!(
                "grouped t-test needs exactly 2 non-empty groups in '{group}', found {}",
                other.len()
            ))),
        }
    }
}
