use clap::{Subcommand, ValueEnum};

/// Which settings tier is active.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ModeArg {
    Simple,
    Advanced,
}

/// Settings commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SettingsCommands {
    /// Show the mode-appropriate settings.
    Show {
        /// Show every field regardless of mode.
        #[arg(long)]
        all: bool,
    },
    /// Set one field. The value is read as JSON, falling back to plain text.
    Set { field: String, value: String },
    /// Clear one field.
    Clear { field: String },
    /// Switch between the simple and advanced tier.
    Mode { mode: ModeArg },
}
