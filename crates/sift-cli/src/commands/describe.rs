use sift_stats::{central_tendency, dispersion};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::DescribeCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `sift describe`.
pub async fn handle(
    kind: &DescribeCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match kind {
        DescribeCommands::Central(source) => {
            ctx.load_source(source).await?;
            output(&central_tendency(ctx.session.table()?), flags.format)
        }
        DescribeCommands::Dispersion(source) => {
            ctx.load_source(source).await?;
            output(&dispersion(ctx.session.table()?), flags.format)
        }
    }
}
