mod init;
mod list;
mod save;
mod show;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::DatasetCommands;
use crate::context::AppContext;

/// Handle `sift dataset`.
pub async fn handle(
    action: &DatasetCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        DatasetCommands::Init => init::run(ctx, flags).await,
        DatasetCommands::Save { name, file } => save::run(name, file, ctx, flags).await,
        DatasetCommands::List => list::run(ctx, flags).await,
        DatasetCommands::Show { id } => show::run(*id, ctx, flags).await,
    }
}
