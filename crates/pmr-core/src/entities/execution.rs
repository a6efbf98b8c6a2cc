use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Article;

/// One executed query text and what it returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ExecutionRecord {
    /// Exact text dispatched to the fetch collaborator.
    pub query_text: String,
    /// Articles in the order the collaborator returned them.
    pub results: Vec<Article>,
    pub executed_at: DateTime<Utc>,
}

impl ExecutionRecord {
    #[must_use]
    pub fn find(&self, pmid: &str) -> Option<&Article> {
        self.results.iter().find(|article| article.pmid == pmid)
    }
}
