use std::collections::BTreeMap;

use sift_core::Table;

use crate::error::StatsError;

/// Split the numeric column `value` by the labels of categorical column
/// `group`, ordered by label. Rows with a missing label are dropped; rows
/// with a missing value keep their group but contribute nothing to it.
///
/// # Errors
///
/// `StatsError::Core` if either column is unknown or has the wrong kind.
pub fn partition(table: &Table, value: &str, group: &str) -> Result<BTreeMap<String, Vec<f64>>, StatsError> {
    let value_column = table.column(value)?;
    value_column.numeric_values()?;
    let labels = table.column(group)?.labels()?;

    let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for (row, label) in labels.iter().enumerate() {
        let Some(label) = label else { continue };
        let entry = groups.entry(label.clone()).or_default();
        if let Some(v) = value_column.numeric_at(row) {
            entry.push(v);
        }
    }
    Ok(groups)
}

/// Rows where both numeric columns `x` and `y` are present, as
/// `(row, x, y)` in row order.
///
/// # Errors
///
/// `StatsError::Core` if either column is unknown or not numeric.
pub fn complete_rows(table: &Table, x: &str, y: &str) -> Result<Vec<(usize, f64, f64)>, StatsError> {
    let x_column = table.column(x)?;
    let y_column = table.column(y)?;
    x_column.numeric_values()?;
    y_column.numeric_values()?;
    Ok((0..table.row_count())
        .filter_map(|row| Some((row, x_column.numeric_at(row)?, y_column.numeric_at(row)?)))
        .collect())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use sift_core::{Column, CoreError};

    use super::*;

    fn table() -> Table {
        Table::new(vec![
            Column::integers("x", [Some(5), Some(1), None, Some(3), Some(2)]),
            Column::texts("g", [Some("b"), Some("a"), Some("c"), None, Some("a")]),
        ])
        .unwrap()
    }

    #[test]
    fn groups_are_ordered_by_label() {
        let groups = partition(&table(), "x", "g").unwrap();
        let keys: Vec<&str> = groups.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
        assert_eq!(groups["a"], vec![1.0, 2.0]);
        assert_eq!(groups["b"], vec![5.0]);
        assert!(groups["c"].is_empty());
    }

    #[test]
    fn complete_rows_skip_either_side_missing() {
        let table = Table::new(vec![
            Column::integers("a", [Some(1), None, Some(3), Some(4)]),
            Column::floats("b", [Some(0.5), Some(1.5), None, Some(2.5)]),
        ])
        .unwrap();
        assert_eq!(
            complete_rows(&table, "a", "b").unwrap(),
            vec![(0, 1.0, 0.5), (3, 4.0, 2.5)]
        );
    }

    #[test]
    fn complete_rows_need_numeric_columns() {
        assert!(complete_rows(&table(), "x", "g").is_err());
    }

    #[test]
    fn value_must_be_numeric() {
        let err = partition(&table(), "g", "g").unwrap_err();
        assert!(matches!(err, StatsError::Core(CoreError::InvalidKind { .. })));
    }

    #[test]
    fn group_must_be_categorical() {
        let err = partition(&table(), "x", "x").unwrap_err();
        assert!(matches!(err, StatsError::Core(CoreError::InvalidKind { .. })));
    }
}
