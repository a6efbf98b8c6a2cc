use pmr_core::enums::Combinator;
use pmr_session::RunReport;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::RunArgs;
use crate::commands::shared::views::OutcomeRow;
use crate::context::AppContext;
use crate::output::output;

/// Handle `pmr run`. Per-query failures are reported, not raised.
pub async fn handle(args: &RunArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let kind = args.merge.map_or(Combinator::Individual, Combinator::from);
    let fetcher = ctx.fetcher()?;
    let report = ctx.session.run_selected(&fetcher, kind).await;

    match report {
        RunReport::NothingSelected => output(&json!({"message": "No queries selected"}), flags.format),
        RunReport::Completed(outcomes) => {
            for failure in outcomes.iter().filter_map(pmr_session::QueryOutcome::failure) {
                tracing::warn!(%failure, "run: query failed");
            }
            let rows = outcomes.iter().map(OutcomeRow::from).collect::<Vec<_>>();
            output(&rows, flags.format)
        }
    }
}
