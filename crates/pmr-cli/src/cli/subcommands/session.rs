use clap::Subcommand;

/// Session lifecycle commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SessionCommands {
    /// Discard the current session and start a fresh one.
    New,
    /// Show the current session.
    Show,
}
