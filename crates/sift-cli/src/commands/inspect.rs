use sift_core::responses::InspectResponse;

use crate::cli::{GlobalFlags, SourceArgs};
use crate::context::AppContext;
use crate::output::output;

/// Handle `sift inspect`.
pub async fn handle(
    source: &SourceArgs,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    ctx.load_source(source).await?;
    let preview_rows = flags.limit.unwrap_or(ctx.config.general.preview_rows);
    let table = ctx.session.table()?;
    let response = InspectResponse::from_table(table, ctx.session.dataset_id(), preview_rows);
    output(&response, flags.format)
}
