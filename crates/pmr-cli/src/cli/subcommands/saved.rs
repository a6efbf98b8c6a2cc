use clap::Subcommand;

/// Saved result commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SavedCommands {
    /// List saved results.
    List,
    /// Restore the session that produced a saved result.
    Restore {
        /// Row number as shown by `pmr saved list`.
        row: usize,
    },
}
