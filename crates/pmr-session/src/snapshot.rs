//! Snapshot Engine: capture the restorable part of a session and restore it
//! destructively.
//!
//! A snapshot holds the setup, the mode-appropriate settings, the mode flag,
//! at most one query, and every edit buffer. The query collection, execution
//! cache, and transcript outside that scope are not captured; restoring
//! replaces the whole query collection with the snapshot's one query.

use pmr_core::entities::{Query, SNAPSHOT_VERSION, SessionSnapshot};
use serde::Serialize;

use crate::state::Session;

/// What a restore discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RestoreReport {
    /// Queries that were in the session before the restore and are now gone.
    pub discarded_queries: usize,
}

impl Session {
    /// Capture with an explicit focus query.
    #[must_use]
    pub fn capture(&self, focus: Option<&Query>) -> SessionSnapshot {
        SessionSnapshot {
            v: SNAPSHOT_VERSION,
            advanced_mode: self.advanced_mode,
            setup: self.setup.clone(),
            settings: self.settings(),
            query: focus.cloned(),
            editor_buffers: self.editor_buffers.clone(),
        }
    }

    /// Capture the ambient state, focused on the first selected query.
    #[must_use]
    pub fn capture_ambient(&self) -> SessionSnapshot {
        self.capture(self.queries.first_selected())
    }

    /// Capture focused on the query that produced a result.
    ///
    /// Uses the displayed query with exactly this text when there is one,
    /// otherwise a fresh query (merged expressions have no query of their
    /// own).
    #[must_use]
    pub fn capture_for_text(&self, query_text: &str) -> SessionSnapshot {
        match self.queries.visible().find(|q| q.text == query_text) {
            Some(query) => self.capture(Some(query)),
            None => self.capture(Some(&Query::new(query_text))),
        }
    }

    /// Replace setup, settings, mode, the query collection, and edit buffers
    /// with the snapshot's. The execution cache and transcript are kept.
    pub fn restore(&mut self, snapshot: SessionSnapshot) -> RestoreReport {
        let retained_id = snapshot.query.as_ref().map(|q| q.id.clone());
        let discarded_queries = self
            .queries
            .iter()
            .filter(|q| Some(&q.id) != retained_id.as_ref())
            .count();
        if discarded_queries > 0 {
            tracing::warn!(
                discarded_queries,
                "snapshot: restore replaced the query collection"
            );
        }

        self.setup = snapshot.setup;
        self.settings = snapshot.settings.into_combined();
        self.advanced_mode = snapshot.advanced_mode;
        self.queries.replace_with(snapshot.query.into_iter().collect());
        self.editor_buffers = snapshot.editor_buffers;

        tracing::info!(v = snapshot.v, "snapshot: restored");
        RestoreReport { discarded_queries }
    }
}
