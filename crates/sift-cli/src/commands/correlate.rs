use crate::cli::{GlobalFlags, SourceArgs};
use crate::context::AppContext;
use crate::output::output;

/// Handle `sift correlate`.
pub async fn handle(
    source: &SourceArgs,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    ctx.load_source(source).await?;
    let matrix = sift_stats::correlation_matrix(ctx.session.table()?);
    if matrix.columns.is_empty() {
        tracing::warn!("no numeric columns to correlate");
    }
    output(&matrix, flags.format)
}
