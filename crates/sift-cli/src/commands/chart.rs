use anyhow::Context;
use sift_stats::{bar_chart, box_plot, histogram, line, qq_plot, scatter};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ChartCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `sift chart`.
pub async fn handle(
    kind: &ChartCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match kind {
        ChartCommands::Histogram {
            column,
            bins,
            source,
        } => {
            ctx.load_source(source).await?;
            let values = ctx.session.table()?.column(column)?.numeric_values()?;
            let bins = bins.unwrap_or(ctx.config.general.histogram_bins);
            let series = histogram(column, &values, bins)
                .with_context(|| format!("cannot build histogram of '{column}'"))?;
            output(&series, flags.format)
        }
        ChartCommands::Qq { column, source } => {
            ctx.load_source(source).await?;
            let values = ctx.session.table()?.column(column)?.numeric_values()?;
            let series =
                qq_plot(column, &values).with_context(|| format!("cannot build Q-Q plot of '{column}'"))?;
            output(&series, flags.format)
        }
        ChartCommands::Scatter {
            x,
            y,
            color,
            source,
        } => {
            ctx.load_source(source).await?;
            let series = scatter(ctx.session.table()?, x, y, color.as_deref())
                .with_context(|| format!("cannot build scatter of '{y}' against '{x}'"))?;
            output(&series, flags.format)
        }
        ChartCommands::Line { x, y, source } => {
            ctx.load_source(source).await?;
            let series = line(ctx.session.table()?, x, y)
                .with_context(|| format!("cannot build line of '{y}' against '{x}'"))?;
            output(&series, flags.format)
        }
        ChartCommands::BoxPlot { column, by, source } => {
            ctx.load_source(source).await?;
            let plot = box_plot(ctx.session.table()?, column, by.as_deref())
                .with_context(|| format!("cannot build box plot of '{column}'"))?;
            output(&plot, flags.format)
        }
        ChartCommands::Bar { x, y, source } => {
            ctx.load_source(source).await?;
            let chart = bar_chart(ctx.session.table()?, x, y)
                .with_context(|| format!("cannot build bar chart of '{y}' by '{x}'"))?;
            output(&chart, flags.format)
        }
    }
}
