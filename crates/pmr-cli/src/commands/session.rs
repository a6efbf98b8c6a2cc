use pmr_config::PmrConfig;
use pmr_session::Session;
use serde_json::json;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::SessionCommands;
use crate::commands::shared::views::QueryRow;
use crate::context::AppContext;
use crate::output::output;

/// Handle `pmr session show`. `new` is handled before a session is loaded.
pub fn handle(
    action: &SessionCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        SessionCommands::Show => show(ctx, flags),
        SessionCommands::New => new(&ctx.config, flags),
    }
}

/// Discard the session file and write a fresh session in its place.
pub fn new(config: &PmrConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let path = bootstrap::session_path(config, flags);
    let discarded = Session::discard(&path)?;
    let mut session = Session::new(bootstrap::session_defaults(config));
    session.set_advanced_mode(config.general.advanced_mode);
    session.save(&path)?;
    output(
        &json!({
            "session_file": path.display().to_string(),
            "discarded_previous": discarded,
            "advanced_mode": session.advanced_mode(),
        }),
        flags.format,
    )
}

fn show(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let session = &ctx.session;
    let queries = session
        .queries()
        .visible()
        .map(QueryRow::from)
        .collect::<Vec<_>>();
    output(
        &json!({
            "session_file": ctx.session_path.display().to_string(),
            "setup": session.setup(),
            "store_id": session.store_id(),
            "advanced_mode": session.advanced_mode(),
            "settings": session.settings(),
            "queries": queries,
            "executed_queries": session.cache().len(),
            "chat_messages": session.transcript().len(),
        }),
        flags.format,
    )
}
