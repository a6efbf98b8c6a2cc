use crate::cli::GlobalFlags;
use crate::cli::subcommands::QueryCommands;
use crate::commands::shared::views::QueryRow;
use crate::context::AppContext;
use crate::output::output;

/// Handle `pmr query`. Every change prints the resulting visible list.
pub fn handle(
    action: &QueryCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let session = &mut ctx.session;
    match action {
        QueryCommands::Add { text, select } => {
            let query = session.add_query(text.as_str());
            if *select {
                session.set_selected(&query.id, true)?;
            }
        }
        QueryCommands::Edit { id, text } => session.edit_query(id, text.as_str())?,
        QueryCommands::Select { ids } => {
            for id in ids {
                session.set_selected(id, true)?;
            }
        }
        QueryCommands::Deselect { ids } => {
            for id in ids {
                session.set_selected(id, false)?;
            }
        }
        QueryCommands::Delete { ids } => {
            for id in ids {
                session.delete_query(id)?;
            }
        }
        QueryCommands::List { all: true } => {
            let rows = session.queries().iter().map(QueryRow::from).collect::<Vec<_>>();
            return output(&rows, flags.format);
        }
        QueryCommands::List { all: false } => {}
    }
    let rows = session.queries().visible().map(QueryRow::from).collect::<Vec<_>>();
    output(&rows, flags.format)
}
