//! Flat output rows shaped for table rendering.

use pmr_core::entities::{Article, ExecutionRecord, Query};
use pmr_session::{ExecutionOutcome, QueryOutcome};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct QueryRow {
    pub id: String,
    pub selected: bool,
    pub text: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,
}

impl From<&Query> for QueryRow {
    fn from(query: &Query) -> Self {
        Self {
            id: query.id.clone(),
            selected: query.selected,
            text: query.text.clone(),
            hidden: !query.displayed,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ArticleRow {
    pub pmid: String,
    pub year: Option<i32>,
    pub first_author: String,
    pub title: String,
    pub journal: String,
    pub free: bool,
}

impl From<&Article> for ArticleRow {
    fn from(article: &Article) -> Self {
        Self {
            pmid: article.pmid.clone(),
            year: article.year(),
            first_author: article.first_author.clone(),
            title: article.title.clone(),
            journal: article.journal.clone(),
            free: article.is_free,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HistoryRow {
    pub query: String,
    pub results: usize,
    pub executed_at: String,
}

impl From<&ExecutionRecord> for HistoryRow {
    fn from(record: &ExecutionRecord) -> Self {
        Self {
            query: record.query_text.clone(),
            results: record.results.len(),
            executed_at: record.executed_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OutcomeRow {
    pub query: String,
    pub status: &'static str,
    pub results: Option<usize>,
    pub message: String,
}

impl From<&QueryOutcome> for OutcomeRow {
    fn from(outcome: &QueryOutcome) -> Self {
        let (status, results) = match &outcome.outcome {
            ExecutionOutcome::Fetched { results } => ("fetched", Some(results.len())),
            ExecutionOutcome::AlreadyRun => ("already_run", None),
            ExecutionOutcome::SkippedEmpty => ("skipped_empty", None),
            ExecutionOutcome::Failed { .. } => ("failed", None),
        };
        Self {
            query: outcome.query_text.clone(),
            status,
            results,
            message: outcome.message(),
        }
    }
}
