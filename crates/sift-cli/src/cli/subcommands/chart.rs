use clap::Subcommand;

use crate::cli::SourceArgs;

/// Chart series. Rendering is left to the plotting tool of your choice.
#[derive(Clone, Debug, Subcommand)]
pub enum ChartCommands {
    /// Histogram bins of one numeric column.
    Histogram {
        column: String,
        /// Bin count, clamped to 5..=100 (default from config, 30).
        #[arg(long)]
        bins: Option<usize>,
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Normal Q-Q plot points and reference line.
    Qq {
        column: String,
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Points of two numeric columns over complete rows.
    Scatter {
        x: String,
        y: String,
        /// Categorical column labelling each point.
        #[arg(long)]
        color: Option<String>,
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Points of two numeric columns in row order.
    Line {
        x: String,
        y: String,
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Quartiles, whiskers, and outliers, optionally per group.
    #[command(name = "box")]
    BoxPlot {
        column: String,
        /// Categorical column to split by.
        #[arg(long)]
        by: Option<String>,
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Numeric values stacked by the labels of a categorical column.
    Bar {
        x: String,
        y: String,
        #[command(flatten)]
        source: SourceArgs,
    },
}
