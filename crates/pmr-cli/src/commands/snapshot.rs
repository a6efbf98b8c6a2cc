use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SnapshotCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `pmr snapshot`.
pub async fn handle(
    action: &SnapshotCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let store = ctx.store()?;
    match action {
        SnapshotCommands::Save => {
            let receipt = ctx.session.save_settings(&store).await?;
            output(
                &json!({"key": ctx.session.settings_key(), "receipt": receipt}),
                flags.format,
            )
        }
        SnapshotCommands::Load => {
            let outcome = ctx.session.load_settings(&store).await?;
            output(
                &json!({"outcome": outcome, "settings": ctx.session.settings()}),
                flags.format,
            )
        }
    }
}
