use clap::Subcommand;

use crate::cli::SourceArgs;

/// Statistical tests. Each prints one result: the statistic, p-value, and
/// verdict at alpha = 0.05, or an error entry.
#[derive(Clone, Debug, Subcommand)]
pub enum TestCommands {
    /// Shapiro-Wilk normality test.
    Normality {
        column: String,
        #[command(flatten)]
        source: SourceArgs,
    },
    /// One-sample t-test of the column mean against zero.
    #[command(name = "one-sample")]
    OneSample {
        column: String,
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Independent two-sample t-test (pooled variance) between two columns.
    #[command(name = "two-sample")]
    TwoSample {
        left: String,
        right: String,
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Paired t-test between two columns.
    Paired {
        left: String,
        right: String,
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Two-sample t-test between the two groups of a categorical column.
    Grouped {
        value: String,
        #[arg(long)]
        by: String,
        #[command(flatten)]
        source: SourceArgs,
    },
    /// One-way ANOVA across the groups of a categorical column.
    Anova {
        value: String,
        #[arg(long)]
        by: String,
        #[command(flatten)]
        source: SourceArgs,
    },
}

impl TestCommands {
    #[must_use]
    pub const fn source(&self) -> &SourceArgs {
        match self {
            Self::Normality { source, .. }
            | Self::OneSample { source, .. }
            | Self::TwoSample { source, .. }
            | Self::Paired { source, .. }
            | Self::Grouped { source, .. }
            | Self::Anova { source, .. } => source,
        }
    }
}
