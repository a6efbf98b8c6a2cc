//! Query Entity Store.
//!
//! Insertion-ordered collection of queries. Nothing is ever hard-removed
//! during a session: delete clears `displayed`. The only wholesale
//! replacement is snapshot restore.

use pmr_core::entities::Query;
use pmr_core::protocol::QuerySuggestion;
use serde::{Deserialize, Serialize};

use crate::error::SessionError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryStore {
    queries: Vec<Query>,
}

impl QueryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fresh displayed, unselected query.
    pub fn add(&mut self, text: impl Into<String>) -> &Query {
        self.push(Query::new(text))
    }

    pub fn push(&mut self, query: Query) -> &Query {
        self.queries.push(query);
        &self.queries[self.queries.len() - 1]
    }

    /// Append one new query per suggestion, returning the new identifiers in
    /// order. Existing queries are untouched.
    pub fn append_suggestions(&mut self, suggestions: &[QuerySuggestion]) -> Vec<String> {
        suggestions
            .iter()
            .map(|suggestion| self.add(suggestion.query_text.clone()).id.clone())
            .collect()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Query> {
        self.queries.iter().find(|q| q.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Query, SessionError> {
        self.queries
            .iter_mut()
            .find(|q| q.id == id)
            .ok_or_else(|| SessionError::QueryNotFound { id: id.to_string() })
    }

    /// # Errors
    ///
    /// Returns `SessionError::QueryNotFound` for an unknown id.
    pub fn set_text(&mut self, id: &str, text: impl Into<String>) -> Result<(), SessionError> {
        self.get_mut(id)?.text = text.into();
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `SessionError::QueryNotFound` for an unknown id.
    pub fn set_selected(&mut self, id: &str, selected: bool) -> Result<(), SessionError> {
        self.get_mut(id)?.selected = selected;
        Ok(())
    }

    /// Soft delete: hide the query for the rest of the session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::QueryNotFound` for an unknown id.
    pub fn hide(&mut self, id: &str) -> Result<(), SessionError> {
        self.get_mut(id)?.displayed = false;
        Ok(())
    }

    /// Every query, hidden ones included, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Query> {
        self.queries.iter()
    }

    pub fn visible(&self) -> impl Iterator<Item = &Query> {
        self.queries.iter().filter(|q| q.displayed)
    }

    /// Displayed and selected, in insertion order.
    pub fn runnable(&self) -> impl Iterator<Item = &Query> {
        self.queries.iter().filter(|q| q.is_runnable())
    }

    #[must_use]
    pub fn first_selected(&self) -> Option<&Query> {
        self.runnable().next()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    /// Replace the whole collection.
    pub(crate) fn replace_with(&mut self, queries: Vec<Query>) {
        self.queries = queries;
    }
}
