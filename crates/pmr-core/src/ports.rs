//! Collaborator contracts consumed by the session engine.
//!
//! Each call is one opaque unit of work with two outcomes. Implementations
//! own transport, retries, and timeouts; the engine never retries.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::entities::Article;
use crate::protocol::{CompletionRequest, TypedResponse};

/// One flat row in the durable store.
pub type Record = BTreeMap<String, String>;

/// Structured-completion call.
#[async_trait]
pub trait StructuredCompleter: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Issue one completion. The response kind matches the request mode.
    async fn complete(&self, request: &CompletionRequest) -> Result<TypedResponse, Self::Error>;
}

/// Article search-and-fetch call.
#[async_trait]
pub trait ArticleFetcher: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch up to `max_results` articles for `query`, in relevance order.
    /// An empty vector means no match, not an error.
    async fn fetch(&self, query: &str, max_results: u32) -> Result<Vec<Article>, Self::Error>;
}

/// Append-mostly keyed log.
#[async_trait]
pub trait DurableStore: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Append `record` under `key`, returning an opaque version token.
    async fn write(&self, key: &str, record: &Record) -> Result<String, Self::Error>;

    /// Most recently written record under `key`.
    async fn read_latest(&self, key: &str) -> Result<Option<Record>, Self::Error>;

    /// Every record under `key`, oldest first.
    async fn read_all(&self, key: &str) -> Result<Vec<Record>, Self::Error>;
}
