use anyhow::Context;
use serde::Serialize;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SavedCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct SavedListRow {
    row: usize,
    #[serde(flatten)]
    view: pmr_core::entities::SavedRowView,
}

/// Handle `pmr saved`.
pub async fn handle(
    action: &SavedCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let store = ctx.store()?;
    let rows = ctx.session.list_saved(&store).await?;
    match action {
        SavedCommands::List => {
            let listed = rows
                .iter()
                .enumerate()
                .map(|(index, row)| SavedListRow {
                    row: index + 1,
                    view: row.view(),
                })
                .collect::<Vec<_>>();
            output(&listed, flags.format)
        }
        SavedCommands::Restore { row } => {
            let saved = row
                .checked_sub(1)
                .and_then(|index| rows.get(index))
                .with_context(|| format!("no saved row {row} ({} saved)", rows.len()))?;
            let report = ctx.session.restore_saved(saved)?;
            output(
                &json!({
                    "restored": saved.view(),
                    "discarded_queries": report.discarded_queries,
                    "settings": ctx.session.settings(),
                }),
                flags.format,
            )
        }
    }
}
