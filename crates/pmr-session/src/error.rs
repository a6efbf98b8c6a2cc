//! Session error types.
//!
//! Every variant is recoverable at the session level; none leaves the
//! session partially mutated.

use pmr_core::errors::{ConstraintViolations, CoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    /// Settings validation failed; carries every violated field and rule.
    #[error("constraint violation: {0}")]
    Constraint(#[from] ConstraintViolations),

    /// The structured-completion call failed. The instruction stays in the
    /// transcript for retry.
    #[error("mutation failed: {reason}")]
    MutationFailure { reason: String },

    /// The completion returned a different response kind than requested.
    #[error("mutation failed: expected a {expected} response, received {received}")]
    UnexpectedResponse {
        expected: &'static str,
        received: &'static str,
    },

    /// One query failed to execute.
    #[error("fetch failed for {query:?}: {reason}")]
    FetchFailure { query: String, reason: String },

    /// Durable store read or write failed.
    #[error("persistence failed: {reason}")]
    PersistenceFailure { reason: String },

    /// Snapshot or workspace (de)serialization failed.
    #[error("snapshot error: {0}")]
    Snapshot(#[from] CoreError),

    #[error("query not found: {id}")]
    QueryNotFound { id: String },

    /// Session workspace file I/O failed.
    #[error("workspace file error: {0}")]
    Workspace(#[from] std::io::Error),
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Snapshot(CoreError::Serialization(err))
    }
}
