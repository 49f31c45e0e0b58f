use std::path::Path;

use anyhow::Context;
use sift_core::DatasetOverview;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    name: &str,
    file: &Path,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let table = sift_ingest::load_path(file)
        .with_context(|| format!("failed to load {}", file.display()))?;
    let stored = ctx
        .store()
        .await?
        .save(&table, name)
        .await
        .with_context(|| format!("failed to save dataset '{name}'"))?;

    output(
        &DatasetOverview {
            id: stored.id,
            name: stored.name,
            upload_date: stored.upload_date,
            rows: Some(table.row_count()),
            columns: Some(table.column_count()),
            error: None,
        },
        flags.format,
    )
}
