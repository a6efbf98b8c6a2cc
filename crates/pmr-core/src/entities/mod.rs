//! Entity structs for the session data model.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON
//! roundtrip, snapshot persistence, and schema validation.

mod article;
mod chat;
mod execution;
mod query;
mod saved;
mod settings;
mod setup;
mod snapshot;

pub use article::Article;
pub use chat::ChatMessage;
pub use execution::ExecutionRecord;
pub use query::Query;
pub use saved::{SavedResult, SavedRow, SavedRowView, SearchContext};
pub use settings::{
    AdvancedTier, CombinedSettings, MIN_YEAR, QUERIES_TO_GENERATE_RANGE, RESULTS_PER_QUERY_RANGE,
    Settings, SimpleTier, current_year,
};
pub use setup::Setup;
pub use snapshot::{SNAPSHOT_VERSION, SessionSnapshot};
