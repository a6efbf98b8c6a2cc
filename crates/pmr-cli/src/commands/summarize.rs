use anyhow::Context;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SummarizeArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `pmr summarize`.
pub async fn handle(args: &SummarizeArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let (_, article) = ctx
        .session
        .find_article(&args.pmid)
        .with_context(|| format!("no fetched article with PMID {}", args.pmid))?;
    let completer = ctx.completer()?;
    let summary = ctx.session.summarize_article(article, &completer).await?;
    output(
        &json!({
            "pmid": article.pmid,
            "title": article.title,
            "summary": summary,
        }),
        flags.format,
    )
}
