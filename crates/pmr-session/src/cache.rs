//! Execution Cache.
//!
//! Keys are the exact text dispatched to the fetcher, with no whitespace or
//! case normalization: two texts differing only in spacing fetch
//! independently. A text enters the cache only after a successful fetch, so
//! a failure never blocks a retry. Cleared only by starting a new session.

use std::collections::BTreeSet;

use chrono::Utc;
use pmr_core::entities::{Article, ExecutionRecord};
use pmr_core::ports::ArticleFetcher;
use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// What happened to one dispatch unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExecutionOutcome {
    /// Fetched and recorded. An empty list is a valid result.
    Fetched { results: Vec<Article> },
    /// The exact text already ran this session; the fetcher was not called.
    AlreadyRun,
    /// Blank text; never reaches the fetcher or the cache.
    SkippedEmpty,
    /// The fetcher failed; the text is not cached.
    Failed { reason: String },
}

/// Outcome for one dispatched text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryOutcome {
    pub query_text: String,
    #[serde(flatten)]
    pub outcome: ExecutionOutcome,
}

impl QueryOutcome {
    /// Short status line for display.
    #[must_use]
    pub fn message(&self) -> String {
        match &self.outcome {
            ExecutionOutcome::Fetched { results } => format!("Fetched {} results", results.len()),
            ExecutionOutcome::AlreadyRun => "Query already run - skipping duplicate".into(),
            ExecutionOutcome::SkippedEmpty => "Empty query - skipping".into(),
            ExecutionOutcome::Failed { reason } => format!("Query failed: {reason}"),
        }
    }

    /// The failure as an error, if this unit failed.
    #[must_use]
    pub fn failure(&self) -> Option<SessionError> {
        match &self.outcome {
            ExecutionOutcome::Failed { reason } => Some(SessionError::FetchFailure {
                query: self.query_text.clone(),
                reason: reason.clone(),
            }),
            _ => None,
        }
    }
}

/// Executed-text set plus the result history it guards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionCache {
    executed: BTreeSet<String>,
    history: Vec<ExecutionRecord>,
}

impl ExecutionCache {
    #[must_use]
    pub fn contains(&self, text: &str) -> bool {
        self.executed.contains(text)
    }

    /// Execution records, oldest first. One per distinct executed text.
    #[must_use]
    pub fn history(&self) -> &[ExecutionRecord] {
        &self.history
    }

    #[must_use]
    pub fn record_for(&self, text: &str) -> Option<&ExecutionRecord> {
        self.history.iter().find(|record| record.query_text == text)
    }

    /// Number of distinct texts executed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.executed.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.executed.is_empty()
    }

    /// Run `text` through the fetcher unless it is blank or already ran.
    pub async fn dispatch<F>(&mut self, fetcher: &F, text: &str, max_results: u32) -> QueryOutcome
    where
        F: ArticleFetcher + ?Sized,
    {
        let outcome = if text.trim().is_empty() {
            ExecutionOutcome::SkippedEmpty
        } else if self.executed.contains(text) {
            tracing::debug!(query = text, "execution: cache hit");
            ExecutionOutcome::AlreadyRun
        } else {
            match fetcher.fetch(text, max_results).await {
                Ok(results) => {
                    self.executed.insert(text.to_string());
                    self.history.push(ExecutionRecord {
                        query_text: text.to_string(),
                        results: results.clone(),
                        executed_at: Utc::now(),
                    });
                    tracing::info!(query = text, results = results.len(), "execution: fetched");
                    ExecutionOutcome::Fetched { results }
                }
                Err(e) => {
                    tracing::warn!(query = text, error = %e, "execution: fetch failed");
                    ExecutionOutcome::Failed {
                        reason: e.to_string(),
                    }
                }
            }
        };
        QueryOutcome {
            query_text: text.to_string(),
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::FakeFetcher;

    #[tokio::test]
    async fn repeated_text_fetches_once() {
        let fetcher = FakeFetcher::default();
        let mut cache = ExecutionCache::default();

        let first = cache.dispatch(&fetcher, "X", 10).await;
        let second = cache.dispatch(&fetcher, "X", 10).await;

        assert!(matches!(first.outcome, ExecutionOutcome::Fetched { .. }));
        assert_eq!(second.outcome, ExecutionOutcome::AlreadyRun);
        assert_eq!(fetcher.calls(), vec!["X".to_string()]);
        assert_eq!(cache.history().len(), 1);
    }

    #[tokio::test]
    async fn failure_does_not_poison_cache() {
        let fetcher = FakeFetcher::default();
        fetcher.fail_next("network down");
        let mut cache = ExecutionCache::default();

        let failed = cache.dispatch(&fetcher, "X", 10).await;
        assert!(failed.failure().is_some());
        assert!(!cache.contains("X"));

        let retried = cache.dispatch(&fetcher, "X", 10).await;
        assert!(matches!(retried.outcome, ExecutionOutcome::Fetched { .. }));
        assert_eq!(fetcher.calls().len(), 2);
        assert_eq!(cache.history().len(), 1);
    }

    #[tokio::test]
    async fn whitespace_variants_are_distinct_keys() {
        let fetcher = FakeFetcher::default();
        let mut cache = ExecutionCache::default();

        cache.dispatch(&fetcher, "triclosan AND liver", 10).await;
        cache.dispatch(&fetcher, "triclosan  AND liver", 10).await;

        assert_eq!(fetcher.calls().len(), 2);
        assert_eq!(cache.history().len(), 2);
    }

    #[tokio::test]
    async fn blank_text_is_skipped() {
        let fetcher = FakeFetcher::default();
        let mut cache = ExecutionCache::default();

        let outcome = cache.dispatch(&fetcher, "  \n", 10).await;

        assert_eq!(outcome.outcome, ExecutionOutcome::SkippedEmpty);
        assert_eq!(outcome.message(), "Empty query - skipping");
        assert!(fetcher.calls().is_empty());
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn empty_result_is_recorded() {
        let fetcher = FakeFetcher::default();
        fetcher.respond_with("nothing", Vec::new());
        let mut cache = ExecutionCache::default();

        let outcome = cache.dispatch(&fetcher, "nothing", 10).await;

        assert_eq!(outcome.outcome, ExecutionOutcome::Fetched { results: Vec::new() });
        assert!(cache.contains("nothing"));
        assert_eq!(cache.record_for("nothing").map(|r| r.results.len()), Some(0));
    }
}
