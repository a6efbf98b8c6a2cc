use clap::Subcommand;

/// Query collection commands.
#[derive(Clone, Debug, Subcommand)]
pub enum QueryCommands {
    /// Add a query.
    Add {
        text: String,
        /// Select it for the next run.
        #[arg(long)]
        select: bool,
    },
    /// Replace a query's text.
    Edit { id: String, text: String },
    /// Mark queries for the next run.
    Select {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Unmark queries.
    Deselect {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Hide queries.
    Delete {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// List queries.
    List {
        /// Include hidden queries.
        #[arg(long)]
        all: bool,
    },
}
