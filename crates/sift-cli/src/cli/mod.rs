use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::{Commands, SourceArgs};

/// Top-level CLI parser for the `sift` binary.
#[derive(Debug, Parser)]
#[command(
    name = "sift",
    version,
    about = "Sift - explore tabular datasets and run statistical tests"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max rows to return
    #[arg(short, long, global = true)]
    pub limit: Option<usize>,

    /// Quiet mode (errors only in the log)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::{CommandFactory, Parser};

    use super::subcommands::{ChartCommands, DatasetCommands, TestCommands};
    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "sift", "--format", "table", "--limit", "10", "--verbose", "inspect", "--file",
            "data.csv",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.limit, Some(10));
        assert!(cli.verbose);
        let Commands::Inspect(source) = cli.command else {
            panic!("expected inspect");
        };
        assert_eq!(source.file, Some(PathBuf::from("data.csv")));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["sift", "correlate", "--dataset", "3", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        let Commands::Correlate(source) = cli.command else {
            panic!("expected correlate");
        };
        assert_eq!(source.dataset, Some(3));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["sift", "--format", "xml", "summary"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn file_and_dataset_conflict() {
        let parsed =
            Cli::try_parse_from(["sift", "summary", "--file", "a.csv", "--dataset", "1"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn category_flag_repeats() {
        let cli = Cli::try_parse_from([
            "sift", "test", "anova", "score", "--by", "cohort", "--file", "a.csv", "--category",
            "cohort", "--category", "site",
        ])
        .expect("cli should parse");
        let Commands::Test {
            kind: TestCommands::Anova { value, by, source },
        } = cli.command
        else {
            panic!("expected anova");
        };
        assert_eq!(value, "score");
        assert_eq!(by, "cohort");
        assert_eq!(source.categories, vec!["cohort", "site"]);
    }

    #[test]
    fn chart_histogram_bins_are_optional() {
        let cli = Cli::try_parse_from(["sift", "chart", "histogram", "x", "--file", "a.csv"])
            .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Chart {
                kind: ChartCommands::Histogram { bins: None, .. }
            }
        ));
    }

    #[test]
    fn chart_box_takes_optional_group() {
        let cli = Cli::try_parse_from(["sift", "chart", "box", "score", "--by", "site", "--file", "a.csv"])
            .expect("cli should parse");
        let Commands::Chart {
            kind: ChartCommands::BoxPlot { column, by, .. },
        } = cli.command
        else {
            panic!("expected chart box");
        };
        assert_eq!(column, "score");
        assert_eq!(by.as_deref(), Some("site"));
    }

    #[test]
    fn dataset_save_requires_name_and_file() {
        assert!(Cli::try_parse_from(["sift", "dataset", "save", "--file", "a.csv"]).is_err());
        let cli = Cli::try_parse_from(["sift", "dataset", "save", "survey", "--file", "a.csv"])
            .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Dataset {
                action: DatasetCommands::Save { .. }
            }
        ));
    }
}
