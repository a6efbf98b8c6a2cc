//! Saved results: a snapshot plus one article and a note, with a flattened
//! row projection for tabular storage.
//!
//! The row carries the snapshot twice: once as the opaque `state_snapshot`
//! blob (for restore) and once spread over human-readable columns (for
//! display). `SavedRowView` is the display projection without the blob.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{Article, SessionSnapshot};
use crate::errors::CoreError;

/// The search that produced a saved result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SearchContext {
    pub query_text: String,
    pub results_count: usize,
    pub researcher_goal: String,
    pub keywords: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SavedResult {
    pub snapshot: SessionSnapshot,
    /// Verbatim serialized snapshot; never part of the readable projection.
    #[serde(skip)]
    pub snapshot_raw: String,
    pub article: Article,
    pub note: String,
    pub context: SearchContext,
}

impl SavedResult {
    /// Assemble a saved result, serializing the snapshot once.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Serialization` if the snapshot cannot be encoded.
    pub fn new(
        snapshot: SessionSnapshot,
        article: Article,
        note: impl Into<String>,
        query_text: impl Into<String>,
        results_count: usize,
    ) -> Result<Self, CoreError> {
        let snapshot_raw = snapshot.to_blob()?;
        let context = SearchContext {
            query_text: query_text.into(),
            results_count,
            researcher_goal: snapshot.setup.researcher_goal.clone(),
            keywords: snapshot
                .settings
                .simple()
                .keywords
                .clone()
                .unwrap_or_default(),
        };
        Ok(Self {
            snapshot,
            snapshot_raw,
            article,
            note: note.into(),
            context,
        })
    }

    /// Flatten for tabular storage.
    #[must_use]
    pub fn to_row(&self, saved_at: DateTime<Utc>) -> SavedRow {
        SavedRow {
            paper_title: self.article.title.clone(),
            paper_authors: self.article.authors.join(", "),
            paper_year: self.article.year().map(|y| y.to_string()).unwrap_or_default(),
            paper_journal: self.article.journal.clone(),
            paper_abstract: self.article.abstract_text.clone().unwrap_or_default(),
            pubmed_url: self.article.pubmed_url(),
            researcher_goal: self.context.researcher_goal.clone(),
            search_query: self.context.query_text.clone(),
            results_count: self.context.results_count.to_string(),
            search_keywords: self.context.keywords.clone(),
            user_note: self.note.clone(),
            state_snapshot: self.snapshot_raw.clone(),
            saved_at: saved_at.to_rfc3339(),
        }
    }
}

/// Flattened saved result, one string per column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SavedRow {
    pub paper_title: String,
    pub paper_authors: String,
    pub paper_year: String,
    pub paper_journal: String,
    pub paper_abstract: String,
    pub pubmed_url: String,
    pub researcher_goal: String,
    pub search_query: String,
    /// Size of the result list the article was picked from.
    pub results_count: String,
    pub search_keywords: String,
    pub user_note: String,
    pub state_snapshot: String,
    pub saved_at: String,
}

impl SavedRow {
    /// As a column map for the durable store.
    #[must_use]
    pub fn to_record(&self) -> BTreeMap<String, String> {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map
                .into_iter()
                .map(|(key, value)| (key, value.as_str().unwrap_or_default().to_string()))
                .collect(),
            _ => BTreeMap::new(),
        }
    }

    /// From a column map; missing columns read as empty strings.
    #[must_use]
    pub fn from_record(record: &BTreeMap<String, String>) -> Self {
        let column = |name: &str| record.get(name).cloned().unwrap_or_default();
        Self {
            paper_title: column("paper_title"),
            paper_authors: column("paper_authors"),
            paper_year: column("paper_year"),
            paper_journal: column("paper_journal"),
            paper_abstract: column("paper_abstract"),
            pubmed_url: column("pubmed_url"),
            researcher_goal: column("researcher_goal"),
            search_query: column("search_query"),
            results_count: column("results_count"),
            search_keywords: column("search_keywords"),
            user_note: column("user_note"),
            state_snapshot: column("state_snapshot"),
            saved_at: column("saved_at"),
        }
    }

    /// Parse the embedded snapshot blob.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Serialization` if the blob is missing or invalid.
    pub fn snapshot(&self) -> Result<SessionSnapshot, CoreError> {
        SessionSnapshot::from_blob(&self.state_snapshot)
    }

    /// Human-readable projection without the snapshot blob.
    #[must_use]
    pub fn view(&self) -> SavedRowView {
        SavedRowView {
            paper_title: self.paper_title.clone(),
            paper_authors: self.paper_authors.clone(),
            paper_year: self.paper_year.clone(),
            paper_journal: self.paper_journal.clone(),
            pubmed_url: self.pubmed_url.clone(),
            search_query: self.search_query.clone(),
            user_note: self.user_note.clone(),
            saved_at: self.saved_at.clone(),
        }
    }
}

/// Display columns of a saved row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SavedRowView {
    pub paper_title: String,
    pub paper_authors: String,
    pub paper_year: String,
    pub paper_journal: String,
    pub pubmed_url: String,
    pub search_query: String,
    pub user_note: String,
    pub saved_at: String,
}
