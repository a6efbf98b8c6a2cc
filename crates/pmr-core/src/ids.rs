//! Identifier generation.
//!
//! Query identifiers correlate a query with its edit buffer for the life of
//! a session and inside snapshots. They carry a short prefix so a buffer
//! key is recognizable in a persisted blob.

/// Prefix for query identifiers.
pub const PREFIX_QUERY: &str = "qry";

/// Generate a new query identifier (`qry-<uuid v4 simple>`).
#[must_use]
pub fn new_query_id() -> String {
    format!("{PREFIX_QUERY}-{}", uuid::Uuid::new_v4().simple())
}
