use clap::Subcommand;

/// Chat refinement commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ChatCommands {
    /// Refine search settings (may also add queries).
    Settings {
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        instruction: Vec<String>,
    },
    /// Generate new queries.
    Queries {
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        instruction: Vec<String>,
    },
    /// Show the chat transcript.
    History,
}
