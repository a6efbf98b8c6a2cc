use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SettingsCommands;
use crate::cli::subcommands::settings::ModeArg;
use crate::commands::shared::parse::parse_setting_value;
use crate::context::AppContext;
use crate::output::output;

/// Handle `pmr settings`.
pub fn handle(
    action: &SettingsCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        SettingsCommands::Show { all: true } => {
            return output(ctx.session.combined_settings(), flags.format);
        }
        SettingsCommands::Show { all: false } => {}
        SettingsCommands::Set { field, value } => {
            ctx.session.set_setting(field, parse_setting_value(value))?;
        }
        SettingsCommands::Clear { field } => ctx.session.clear_setting(field)?,
        SettingsCommands::Mode { mode } => {
            ctx.session.set_advanced_mode(*mode == ModeArg::Advanced);
        }
    }
    output(
        &json!({
            "advanced_mode": ctx.session.advanced_mode(),
            "settings": ctx.session.settings(),
        }),
        flags.format,
    )
}
