use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct InitResponse {
    table: &'static str,
    ready: bool,
    datasets: usize,
}

pub async fn run(ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let store = ctx.store().await?;
    store.init().await?;
    let datasets = store.list().await?.len();
    output(
        &InitResponse {
            table: sift_db::DATASETS_TABLE,
            ready: true,
            datasets,
        },
        flags.format,
    )
}
