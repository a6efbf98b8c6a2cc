use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ResultsArgs;
use crate::commands::shared::views::{ArticleRow, HistoryRow};
use crate::context::AppContext;
use crate::output::output;

/// Handle `pmr results`: the run history, or one query's articles.
pub fn handle(args: &ResultsArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let Some(query) = &args.query else {
        let rows = ctx.session.history().iter().map(HistoryRow::from).collect::<Vec<_>>();
        return output(&rows, flags.format);
    };
    let articles = ctx
        .session
        .results_for(query)
        .with_context(|| format!("query has not been run this session: {query}"))?;
    let rows = articles.iter().map(ArticleRow::from).collect::<Vec<_>>();
    output(&rows, flags.format)
}
