use anyhow::Context;
use sift_core::responses::DatasetDetail;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(id: i64, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let preview_rows = flags.limit.unwrap_or(ctx.config.general.preview_rows);
    let stored = ctx.store().await?.get(id).await?;
    let table = sift_ingest::read_csv(stored.data.as_bytes())
        .with_context(|| format!("stored dataset {id} does not decode"))?;
    output(&DatasetDetail::new(&stored, &table, preview_rows), flags.format)
}
