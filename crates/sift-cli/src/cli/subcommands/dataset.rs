use std::path::PathBuf;

use clap::Subcommand;

/// Stored dataset commands. All of them need `DATABASE_URL`.
#[derive(Clone, Debug, Subcommand)]
pub enum DatasetCommands {
    /// Create the dataset table if it does not exist.
    Init,
    /// Load a file and store a snapshot of it under a name.
    Save {
        name: String,
        #[arg(long, value_name = "PATH")]
        file: PathBuf,
    },
    /// List stored datasets with their shape.
    List,
    /// Show one stored dataset: shape, columns, and a preview.
    Show { id: i64 },
}
