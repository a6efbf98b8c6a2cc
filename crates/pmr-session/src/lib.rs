//! # pmr-session
//!
//! The session state engine for the PubMed query workspace.
//!
//! A [`Session`] is an explicit value owned by its caller; there is no
//! process-wide state. It holds the researcher setup, the combined search
//! settings with the advanced-mode flag, the [`QueryStore`], per-query edit
//! buffers, the [`ExecutionCache`] with result history, and the chat
//! transcript.
//!
//! Operations are split by concern, each an `impl Session` block:
//! - `mutation`: chat instruction → one structured completion → merge
//! - `execution`: sync buffers → combine selected queries → cached fetch
//! - `snapshot`: capture and destructive restore
//! - `saved`: saved results and settings snapshots in the durable store
//! - `summary`: one-article relevance summary
//! - `workspace`: whole-session JSON file between CLI invocations
//!
//! Collaborators (completion, fetch, store) are passed per call as trait
//! objects or generics from `pmr_core::ports`.

mod cache;
mod combinator;
mod error;
mod execution;
mod mutation;
mod saved;
mod snapshot;
mod state;
mod store;
mod summary;
mod workspace;

#[cfg(test)]
pub(crate) mod test_support;

pub use cache::{ExecutionCache, ExecutionOutcome, QueryOutcome};
pub use combinator::{Combined, combine};
pub use error::SessionError;
pub use execution::RunReport;
pub use mutation::MutationOutcome;
pub use saved::{LoadOutcome, SaveReceipt};
pub use snapshot::RestoreReport;
pub use state::{Session, SessionDefaults};
pub use store::QueryStore;
pub use summary::append_summary;
