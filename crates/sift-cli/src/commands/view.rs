use sift_core::SortOrder;
use sift_core::responses::TablePreview;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ViewArgs;
use crate::context::AppContext;
use crate::output::output_preview;

/// Handle `sift view`.
pub async fn handle(args: &ViewArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.load_source(&args.source).await?;
    let table = ctx.session.table()?;

    let selected = if args.columns.is_empty() {
        table.clone()
    } else {
        table.select(&args.columns)?
    };
    let view = match &args.sort {
        Some(column) => {
            let order = if args.descending {
                SortOrder::Descending
            } else {
                SortOrder::Ascending
            };
            selected.sort_by(column, order)?
        }
        None => selected,
    };

    let limit = flags.limit.unwrap_or(ctx.config.general.preview_rows);
    output_preview(&TablePreview::from_table(&view, limit), flags.format)
}
