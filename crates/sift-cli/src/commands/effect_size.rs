use sift_stats::AnalysisRequest;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::PairArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `sift effect-size`.
pub async fn handle(args: &PairArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.load_source(&args.source).await?;
    let request = AnalysisRequest::EffectSize {
        left: args.left.clone(),
        right: args.right.clone(),
    };
    output(&ctx.session.run(&request), flags.format)
}
