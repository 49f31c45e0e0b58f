use std::path::PathBuf;

use clap::{Args, Subcommand};
use sift_stats::AggFunc;

use crate::cli::subcommands::{ChartCommands, DatasetCommands, DescribeCommands, TestCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Shape, column kinds, missing counts, and a preview.
    Inspect(SourceArgs),
    /// Descriptive statistics for every column.
    Summary(SourceArgs),
    /// Browse rows: select columns, sort, and cut.
    View(ViewArgs),
    /// Run a statistical test.
    Test {
        #[command(subcommand)]
        kind: TestCommands,
    },
    /// Cohen's d between two numeric columns.
    #[command(name = "effect-size")]
    EffectSize(PairArgs),
    /// Pearson correlation matrix of the numeric columns.
    Correlate(SourceArgs),
    /// Central tendency or dispersion per numeric column.
    Describe {
        #[command(subcommand)]
        kind: DescribeCommands,
    },
    /// Aggregate a numeric column by a categorical column.
    Group(GroupArgs),
    /// Prepare chart series for external plotting.
    Chart {
        #[command(subcommand)]
        kind: ChartCommands,
    },
    /// Stored dataset snapshots.
    Dataset {
        #[command(subcommand)]
        action: DatasetCommands,
    },
    /// Dump JSON schema for a response type.
    Schema(SchemaArgs),
}

/// Where the table for a command comes from.
#[derive(Clone, Debug, Default, Args)]
pub struct SourceArgs {
    /// CSV or Excel file to load (.csv, .xls, .xlsx).
    #[arg(long, value_name = "PATH", conflicts_with = "dataset")]
    pub file: Option<PathBuf>,

    /// Stored dataset id to load.
    #[arg(long, value_name = "ID")]
    pub dataset: Option<i64>,

    /// Treat a column as categorical (repeatable).
    #[arg(long = "category", value_name = "COLUMN")]
    pub categories: Vec<String>,
}

/// Arguments for `sift view`.
#[derive(Clone, Debug, Args)]
pub struct ViewArgs {
    /// Columns to show, comma separated (default: all).
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<String>,

    /// Column to sort by.
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending instead of ascending.
    #[arg(long, requires = "sort")]
    pub descending: bool,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Two numeric columns.
#[derive(Clone, Debug, Args)]
pub struct PairArgs {
    pub left: String,
    pub right: String,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for `sift group`.
#[derive(Clone, Debug, Args)]
pub struct GroupArgs {
    /// Numeric column to aggregate.
    pub value: String,

    /// Categorical column to group by.
    #[arg(long)]
    pub by: String,

    /// Aggregation: mean, sum, count, min, max.
    #[arg(long, default_value = "mean")]
    pub function: AggFunc,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for `sift schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Registered type name; omit to list the names.
    pub type_name: Option<String>,
}
