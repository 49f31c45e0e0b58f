use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut datasets = ctx.store().await?.overview().await?;
    if let Some(limit) = flags.limit {
        datasets.truncate(limit);
    }
    output(&datasets, flags.format)
}
