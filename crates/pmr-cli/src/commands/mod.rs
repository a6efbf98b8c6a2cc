pub mod chat;
pub mod dispatch;
pub mod query;
pub mod results;
pub mod run;
pub mod save;
pub mod saved;
pub mod schema;
pub mod session;
pub mod settings;
pub mod setup;
pub mod shared;
pub mod snapshot;
pub mod summarize;
