use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Session { action } => commands::session::handle(&action, ctx, flags),
        Commands::Setup(args) => commands::setup::handle(&args, ctx, flags),
        Commands::Settings { action } => commands::settings::handle(&action, ctx, flags),
        Commands::Chat { action } => commands::chat::handle(&action, ctx, flags).await,
        Commands::Query { action } => commands::query::handle(&action, ctx, flags),
        Commands::Run(args) => commands::run::handle(&args, ctx, flags).await,
        Commands::Results(args) => commands::results::handle(&args, ctx, flags),
        Commands::Summarize(args) => commands::summarize::handle(&args, ctx, flags).await,
        Commands::Save(args) => commands::save::handle(&args, ctx, flags).await,
        Commands::Saved { action } => commands::saved::handle(&action, ctx, flags).await,
        Commands::Snapshot { action } => commands::snapshot::handle(&action, ctx, flags).await,
        Commands::Schema(args) => commands::schema::handle(&args, flags),
    }
}
