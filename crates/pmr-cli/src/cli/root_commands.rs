use clap::{Args, Subcommand, ValueEnum};
use pmr_core::enums::Combinator;

use crate::cli::subcommands::{
    ChatCommands, QueryCommands, SavedCommands, SessionCommands, SettingsCommands,
    SnapshotCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Session lifecycle.
    Session {
        #[command(subcommand)]
        action: SessionCommands,
    },
    /// Set researcher background, goal, and store identifier.
    Setup(SetupArgs),
    /// Search settings.
    Settings {
        #[command(subcommand)]
        action: SettingsCommands,
    },
    /// Ask the model to refine settings or generate queries.
    Chat {
        #[command(subcommand)]
        action: ChatCommands,
    },
    /// Query collection.
    Query {
        #[command(subcommand)]
        action: QueryCommands,
    },
    /// Run the selected queries against PubMed.
    Run(RunArgs),
    /// Show fetched results.
    Results(ResultsArgs),
    /// Summarize one fetched article for this researcher.
    Summarize(SummarizeArgs),
    /// Save one fetched article with a note.
    Save(SaveArgs),
    /// Saved results.
    Saved {
        #[command(subcommand)]
        action: SavedCommands,
    },
    /// Settings snapshots in the durable store.
    Snapshot {
        #[command(subcommand)]
        action: SnapshotCommands,
    },
    /// Dump JSON schema for a registered type.
    Schema(SchemaArgs),
}

/// Arguments for `pmr setup`.
#[derive(Clone, Debug, Args)]
pub struct SetupArgs {
    #[arg(long)]
    pub background: Option<String>,
    #[arg(long)]
    pub goal: Option<String>,
    /// Durable store identifier for saved results.
    #[arg(long)]
    pub store: Option<String>,
}

/// How `pmr run` combines selected queries.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum MergeKind {
    And,
    Or,
}

impl From<MergeKind> for Combinator {
    fn from(kind: MergeKind) -> Self {
        match kind {
            MergeKind::And => Self::And,
            MergeKind::Or => Self::Or,
        }
    }
}

/// Arguments for `pmr run`.
#[derive(Clone, Debug, Args)]
pub struct RunArgs {
    /// Merge selected queries into one expression instead of running each.
    #[arg(long)]
    pub merge: Option<MergeKind>,
}

/// Arguments for `pmr results`.
#[derive(Clone, Debug, Args)]
pub struct ResultsArgs {
    /// Exact query text whose results to list.
    #[arg(long)]
    pub query: Option<String>,
}

/// Arguments for `pmr summarize`.
#[derive(Clone, Debug, Args)]
pub struct SummarizeArgs {
    pub pmid: String,
}

/// Arguments for `pmr save`.
#[derive(Clone, Debug, Args)]
pub struct SaveArgs {
    pub pmid: String,
    #[arg(long, default_value = "")]
    pub note: String,
    /// Query text to record (defaults to the query that fetched the article).
    #[arg(long)]
    pub query: Option<String>,
    /// Append an AI summary to the note before saving.
    #[arg(long)]
    pub summarize: bool,
}

/// Arguments for `pmr schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Schema name; omit to list every registered name.
    pub type_name: Option<String>,
}
