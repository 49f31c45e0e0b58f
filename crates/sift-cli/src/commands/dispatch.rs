use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Inspect(source) => commands::inspect::handle(&source, ctx, flags).await,
        Commands::Summary(source) => commands::summary::handle(&source, ctx, flags).await,
        Commands::View(args) => commands::view::handle(&args, ctx, flags).await,
        Commands::Test { kind } => commands::test::handle(&kind, ctx, flags).await,
        Commands::EffectSize(args) => commands::effect_size::handle(&args, ctx, flags).await,
        Commands::Correlate(source) => commands::correlate::handle(&source, ctx, flags).await,
        Commands::Describe { kind } => commands::describe::handle(&kind, ctx, flags).await,
        Commands::Group(args) => commands::group::handle(&args, ctx, flags).await,
        Commands::Chart { kind } => commands::chart::handle(&kind, ctx, flags).await,
        Commands::Dataset { action } => commands::dataset::handle(&action, ctx, flags).await,
        Commands::Schema(args) => commands::schema::handle(&args, flags),
    }
}
