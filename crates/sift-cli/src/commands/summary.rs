use crate::cli::{GlobalFlags, SourceArgs};
use crate::context::AppContext;
use crate::output::output;

/// Handle `sift summary`.
pub async fn handle(
    source: &SourceArgs,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    ctx.load_source(source).await?;
    let report = sift_stats::summarize(ctx.session.table()?);
    output(&report, flags.format)
}
