//! Column classification.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::table::Table;

/// Column names split by declared kind. Boolean and datetime columns land in
/// neither list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ColumnSet {
    pub numeric: Vec<String>,
    pub categorical: Vec<String>,
}

impl ColumnSet {
    /// Classify every column of `table`, preserving table order in each list.
    #[must_use]
    pub fn classify(table: &Table) -> Self {
        let mut set = Self::default();
        for column in table.columns() {
            let kind = column.kind();
            if kind.is_numeric() {
                set.numeric.push(column.name().to_string());
            } else if kind.is_categorical() {
                set.categorical.push(column.name().to_string());
            }
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::column::{Column, ColumnData};

    fn mixed() -> Table {
        let day = NaiveDate::from_ymd_opt(2024, 1, 2)
            .and_then(|d| d.and_hms_opt(0, 0, 0));
        Table::new(vec![
            Column::texts("name", [Some("a"), Some("b")]),
            Column::integers("count", [Some(1), Some(2)]),
            Column::new("when", ColumnData::DateTime(vec![day, None])),
            Column::new("flag", ColumnData::Boolean(vec![Some(true), None])),
            Column::floats("score", [Some(0.5), None]),
            Column::new("tier", ColumnData::Category(vec![Some("x".into()), None])),
        ])
        .unwrap()
    }

    #[test]
    fn preserves_table_order_within_buckets() {
        let set = mixed().column_set();
        assert_eq!(set.numeric, vec!["count", "score"]);
        assert_eq!(set.categorical, vec!["name", "tier"]);
    }

    #[test]
    fn buckets_are_disjoint_subsets_of_columns() {
        let table = mixed();
        let set = table.column_set();
        let all: HashSet<&str> = table.column_names().into_iter().collect();
        let numeric: HashSet<&str> = set.numeric.iter().map(String::as_str).collect();
        let categorical: HashSet<&str> = set.categorical.iter().map(String::as_str).collect();
        assert!(numeric.is_disjoint(&categorical));
        assert!(numeric.is_subset(&all));
        assert!(categorical.is_subset(&all));
        assert!(!numeric.contains("when") && !categorical.contains("when"));
        assert!(!numeric.contains("flag") && !categorical.contains("flag"));
    }

    #[test]
    fn empty_table_classifies_to_empty_sets() {
        assert_eq!(Table::empty().column_set(), ColumnSet::default());
    }
}
