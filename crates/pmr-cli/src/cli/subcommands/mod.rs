pub mod chat;
pub mod query;
pub mod saved;
pub mod session;
pub mod settings;
pub mod snapshot;

pub use chat::ChatCommands;
pub use query::QueryCommands;
pub use saved::SavedCommands;
pub use session::SessionCommands;
pub use settings::SettingsCommands;
pub use snapshot::SnapshotCommands;
