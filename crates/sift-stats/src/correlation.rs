//! Pearson correlation matrix over numeric columns.

use schemars::JsonSchema;
use serde::Serialize;
use sift_core::{Column, Table};

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    /// Row-major; `values[i][j]` correlates `columns[i]` with `columns[j]`.
    /// `None` where fewer than two complete pairs exist or a side is constant.
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    #[must_use]
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|name| name == a)?;
        let j = self.columns.iter().position(|name| name == b)?;
        self.values[i][j]
    }
}

/// Correlation of two columns over the rows where both are present.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn pearson(x: &Column, y: &Column) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = (0..x.len().min(y.len()))
        .filter_map(|row| Some((x.numeric_at(row)?, y.numeric_at(row)?)))
        .collect();
    if pairs.len() < 2 {
        return None;
    }
    let n = pairs.len() as f64;
    let mx = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let my = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in &pairs {
        let (dx, dy) = (a - mx, b - my);
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return None;
    }
    Some((sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0))
}

/// Pairwise-complete Pearson correlation of every numeric column.
#[must_use]
pub fn correlation_matrix(table: &Table) -> CorrelationMatrix {
    let numeric: Vec<&Column> = table
        .columns()
        .iter()
        .filter(|column| column.kind().is_numeric())
        .collect();
    let values = numeric
        .iter()
        .map(|x| numeric.iter().map(|y| pearson(x, y)).collect())
        .collect();
    CorrelationMatrix {
        columns: numeric.iter().map(|column| column.name().to_string()).collect(),
        values,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn table() -> Table {
        Table::new(vec![
            Column::floats("x", [Some(1.0), Some(2.0), Some(3.0), Some(4.0), None]),
            Column::integers("y", [Some(2), Some(4), Some(6), Some(8), Some(100)]),
            Column::integers("z", [Some(4), Some(3), Some(2), Some(1), Some(0)]),
            Column::integers("k", [Some(7), Some(7), Some(7), Some(7), Some(7)]),
            Column::texts("g", [Some("a"), Some("b"), Some("a"), Some("b"), Some("a")]),
        ])
        .unwrap()
    }

    #[test]
    fn covers_numeric_columns_only() {
        let matrix = correlation_matrix(&table());
        assert_eq!(matrix.columns, vec!["x", "y", "z", "k"]);
        assert_eq!(matrix.values.len(), 4);
    }

    #[test]
    fn uses_pairwise_complete_rows() {
        let matrix = correlation_matrix(&table());
        // The outlier in y sits on the row where x is missing.
        assert!((matrix.get("x", "y").unwrap() - 1.0).abs() < 1e-12);
        assert!((matrix.get("x", "z").unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn constant_column_is_undefined() {
        let matrix = correlation_matrix(&table());
        assert_eq!(matrix.get("k", "x"), None);
        assert_eq!(matrix.get("k", "k"), None);
    }

    #[test]
    fn matrix_is_symmetric_with_unit_diagonal() {
        let matrix = correlation_matrix(&table());
        assert_eq!(matrix.get("y", "z"), matrix.get("z", "y"));
        assert_eq!(matrix.get("z", "z"), Some(1.0));
    }
}
