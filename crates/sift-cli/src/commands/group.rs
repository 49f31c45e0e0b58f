use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::GroupArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `sift group`.
pub async fn handle(args: &GroupArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.load_source(&args.source).await?;
    let grouped = sift_stats::aggregate(ctx.session.table()?, &args.value, &args.by, args.function)
        .with_context(|| format!("cannot aggregate '{}' by '{}'", args.value, args.by))?;
    output(&grouped, flags.format)
}
