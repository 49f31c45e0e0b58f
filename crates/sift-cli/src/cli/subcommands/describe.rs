use clap::Subcommand;

use crate::cli::SourceArgs;

/// Per-column descriptive tables.
#[derive(Clone, Debug, Subcommand)]
pub enum DescribeCommands {
    /// Mean, median, and mode of each numeric column.
    Central(SourceArgs),
    /// Standard deviation, variance, min, and max of each numeric column.
    Dispersion(SourceArgs),
}
