use anyhow::Context;
use chrono::Utc;
use pmr_session::append_summary;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SaveArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `pmr save`. A store failure is reported in the output and does
/// not fail the command.
pub async fn handle(args: &SaveArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let (record, article) = ctx
        .session
        .find_article(&args.pmid)
        .with_context(|| format!("no fetched article with PMID {}", args.pmid))?;
    let query_text = args.query.as_deref().unwrap_or(&record.query_text);

    let mut note = args.note.clone();
    if args.summarize {
        let completer = ctx.completer()?;
        let summary = ctx.session.summarize_article(article, &completer).await?;
        note = append_summary(&note, &summary, Utc::now());
    }

    let store = ctx.store()?;
    let receipt = ctx
        .session
        .save_result(&store, article, &note, query_text, record.results.len())
        .await?;
    if !receipt.saved {
        tracing::warn!(pmid = %article.pmid, "save: result was not stored");
    }
    output(
        &json!({
            "pmid": article.pmid,
            "key": ctx.session.saved_key(),
            "receipt": receipt,
            "note": note,
        }),
        flags.format,
    )
}
