use schemars::{Schema, schema_for};
use sift_core::responses::{DatasetDetail, InspectResponse, TableInfo, TablePreview};
use sift_core::{DatasetOverview, StoredDataset};
use sift_stats::{
    AnalysisRequest, BarChart, BoxPlot, CentralTendency, CorrelationMatrix, Dispersion,
    GroupedAggregation, Histogram, QqPlot, SummaryReport, TestResult, XySeries,
};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

type SchemaFn = fn() -> Schema;

/// Printable response types, by the name `sift schema` accepts.
const REGISTRY: &[(&str, SchemaFn)] = &[
    ("inspect", || schema_for!(InspectResponse)),
    ("table_info", || schema_for!(TableInfo)),
    ("table_preview", || schema_for!(TablePreview)),
    ("summary", || schema_for!(SummaryReport)),
    ("test_result", || schema_for!(TestResult)),
    ("analysis_request", || schema_for!(AnalysisRequest)),
    ("correlation", || schema_for!(CorrelationMatrix)),
    ("central_tendency", || schema_for!(Vec<CentralTendency>)),
    ("dispersion", || schema_for!(Vec<Dispersion>)),
    ("group", || schema_for!(GroupedAggregation)),
    ("histogram", || schema_for!(Histogram)),
    ("qq_plot", || schema_for!(QqPlot)),
    ("xy_series", || schema_for!(XySeries)),
    ("box_plot", || schema_for!(BoxPlot)),
    ("bar_chart", || schema_for!(BarChart)),
    ("stored_dataset", || schema_for!(StoredDataset)),
    ("dataset_overview", || schema_for!(DatasetOverview)),
    ("dataset_list", || schema_for!(Vec<DatasetOverview>)),
    ("dataset_detail", || schema_for!(DatasetDetail)),
];

/// Look up a registered schema.
pub fn lookup(name: &str) -> Option<Schema> {
    REGISTRY
        .iter()
        .find(|(registered, _)| *registered == name)
        .map(|(_, build)| build())
}

pub fn names() -> Vec<&'static str> {
    REGISTRY.iter().map(|(name, _)| *name).collect()
}

/// Handle `sift schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let Some(name) = &args.type_name else {
        return output(&names(), flags.format);
    };
    match lookup(name) {
        Some(schema) => output(&schema, flags.format),
        None => anyhow::bail!(
            "unknown schema '{name}' (known: {})",
            names().join(", ")
        ),
    }
}

#[cfg(test)]
mod tests {
    use sift_core::{Column, Table};
    use sift_stats::AnalysisSession;

    use super::*;

    fn table() -> Table {
        Table::new(vec![
            Column::integers("x", [Some(1), Some(2), Some(3), Some(4), Some(5)]),
            Column::texts("g", [Some("a"), Some("a"), Some("b"), Some("b"), None]),
        ])
        .unwrap()
    }

    fn validates(name: &str, instance: &serde_json::Value) -> bool {
        let schema = serde_json::to_value(lookup(name).unwrap()).unwrap();
        jsonschema::is_valid(&schema, instance)
    }

    #[test]
    fn every_registered_schema_builds() {
        for name in names() {
            let schema = serde_json::to_value(lookup(name).unwrap()).unwrap();
            assert!(schema.is_object(), "schema {name} is not an object");
        }
    }

    #[test]
    fn unknown_name_is_none() {
        assert!(lookup("nope").is_none());
    }

    #[test]
    fn inspect_output_matches_schema() {
        let instance = serde_json::to_value(InspectResponse::from_table(&table(), Some(4), 3)).unwrap();
        assert!(validates("inspect", &instance));
    }

    #[test]
    fn test_results_match_schema_in_both_shapes() {
        let mut session = AnalysisSession::new();
        session.load(table(), None);

        let ok = session.run(&AnalysisRequest::Normality { column: "x".into() });
        let failed = session.run(&AnalysisRequest::Normality { column: "g".into() });
        assert!(!ok.is_error());
        assert!(failed.is_error());

        assert!(validates("test_result", &serde_json::to_value(&ok).unwrap()));
        assert!(validates("test_result", &serde_json::to_value(&failed).unwrap()));
    }

    #[test]
    fn summary_matches_schema() {
        let instance = serde_json::to_value(sift_stats::summarize(&table())).unwrap();
        assert!(validates("summary", &instance));
    }
}
