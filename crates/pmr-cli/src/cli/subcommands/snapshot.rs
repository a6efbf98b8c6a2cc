use clap::Subcommand;

/// Settings snapshot commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SnapshotCommands {
    /// Store the current settings and selected query.
    Save,
    /// Restore the most recently stored settings.
    Load,
}
