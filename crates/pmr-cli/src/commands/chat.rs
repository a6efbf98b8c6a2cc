use pmr_session::MutationOutcome;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ChatCommands;
use crate::commands::shared::parse::join_instruction;
use crate::commands::shared::views::QueryRow;
use crate::context::AppContext;
use crate::output::output;

/// Handle `pmr chat`.
pub async fn handle(
    action: &ChatCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let outcome = match action {
        ChatCommands::History => return output(ctx.session.transcript(), flags.format),
        ChatCommands::Settings { instruction } => {
            let instruction = join_instruction(instruction)?;
            let completer = ctx.completer()?;
            ctx.session.refine_settings(&completer, &instruction).await?
        }
        ChatCommands::Queries { instruction } => {
            let instruction = join_instruction(instruction)?;
            let completer = ctx.completer()?;
            ctx.session.refine_queries(&completer, &instruction).await?
        }
    };
    render(&outcome, ctx, flags)
}

fn render(outcome: &MutationOutcome, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let added = outcome
        .added_query_ids
        .iter()
        .filter_map(|id| ctx.session.queries().get(id))
        .map(QueryRow::from)
        .collect::<Vec<_>>();
    output(
        &json!({
            "message": outcome.message,
            "settings_changed": outcome.settings_changed,
            "settings": ctx.session.settings(),
            "added_queries": added,
        }),
        flags.format,
    )
}
