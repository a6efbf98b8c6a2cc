//! Batch execution: sync buffers, combine the selected queries, dispatch
//! each unit through the execution cache.

use pmr_core::entities::{Article, ExecutionRecord};
use pmr_core::enums::Combinator;
use pmr_core::ports::ArticleFetcher;
use serde::Serialize;

use crate::cache::QueryOutcome;
use crate::combinator::{Combined, combine};
use crate::state::Session;

/// Result of one batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "outcomes", rename_all = "snake_case")]
pub enum RunReport {
    /// No selected, displayed query; nothing was dispatched.
    NothingSelected,
    /// One outcome per dispatched unit, in order. Failures do not stop the
    /// batch.
    Completed(Vec<QueryOutcome>),
}

impl RunReport {
    #[must_use]
    pub fn outcomes(&self) -> &[QueryOutcome] {
        match self {
            Self::NothingSelected => &[],
            Self::Completed(outcomes) => outcomes,
        }
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.outcomes()
            .iter()
            .filter(|o| o.failure().is_some())
            .count()
    }
}

impl Session {
    /// Run every selected, displayed query.
    ///
    /// Edit buffers are synced first. With `And`/`Or` the texts are merged
    /// into one expression; with `Individual` each runs on its own.
    /// Units run sequentially in store order.
    pub async fn run_selected<F>(&mut self, fetcher: &F, kind: Combinator) -> RunReport
    where
        F: ArticleFetcher + ?Sized,
    {
        let synced = self.sync_buffers();
        if synced > 0 {
            tracing::debug!(synced, "execution: edit buffers synced");
        }

        let texts: Vec<String> = self.queries.runnable().map(|q| q.text.clone()).collect();
        let units = match combine(&texts, kind) {
            Combined::NothingSelected => {
                tracing::info!("execution: no queries selected");
                return RunReport::NothingSelected;
            }
            combined => combined.into_units(),
        };

        let max_results = self.results_per_query();
        let mut outcomes = Vec::with_capacity(units.len());
        for unit in &units {
            outcomes.push(self.cache.dispatch(fetcher, unit, max_results).await);
        }
        let report = RunReport::Completed(outcomes);
        tracing::info!(
            units = units.len(),
            failed = report.failed(),
            kind = %kind,
            "execution: batch complete"
        );
        report
    }

    /// Most recent execution record holding an article with this PMID.
    #[must_use]
    pub fn find_article(&self, pmid: &str) -> Option<(&ExecutionRecord, &Article)> {
        self.history()
            .iter()
            .rev()
            .find_map(|record| record.find(pmid).map(|article| (record, article)))
    }

    /// Results previously fetched for exactly this text.
    #[must_use]
    pub fn results_for(&self, text: &str) -> Option<&[Article]> {
        self.cache.record_for(text).map(|r| r.results.as_slice())
    }
}
