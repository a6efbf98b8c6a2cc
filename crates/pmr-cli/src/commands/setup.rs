use crate::cli::GlobalFlags;
use crate::cli::root_commands::SetupArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `pmr setup`. Only the flags given are changed.
pub fn handle(args: &SetupArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut setup = ctx.session.setup().clone();
    if let Some(background) = &args.background {
        setup.researcher_background.clone_from(background);
    }
    if let Some(goal) = &args.goal {
        setup.researcher_goal.clone_from(goal);
    }
    if let Some(store) = &args.store {
        setup.store_id.clone_from(store);
    }
    ctx.session.set_setup(setup);
    output(ctx.session.setup(), flags.format)
}
