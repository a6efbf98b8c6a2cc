//! Live session state.

use std::collections::BTreeMap;

use pmr_core::entities::{
    ChatMessage, CombinedSettings, ExecutionRecord, Query, Settings, Setup,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cache::ExecutionCache;
use crate::error::SessionError;
use crate::store::QueryStore;

/// Fallbacks applied at use time when a settings field is unconstrained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDefaults {
    pub results_per_query: u32,
    pub queries_to_generate: u32,
    /// Durable-store identifier used when the setup names none.
    pub store_key: String,
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            results_per_query: 15,
            queries_to_generate: 10,
            store_key: "pubmedr".into(),
        }
    }
}

/// One researcher's working context.
///
/// Settings are held as the combined field set regardless of mode, so
/// switching to simple mode and back never loses advanced fields. Callers
/// see the mode-appropriate projection through [`Session::settings`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub(crate) setup: Setup,
    pub(crate) settings: CombinedSettings,
    pub(crate) advanced_mode: bool,
    pub(crate) queries: QueryStore,
    /// Raw edit-buffer text keyed by query id.
    pub(crate) editor_buffers: BTreeMap<String, String>,
    pub(crate) cache: ExecutionCache,
    pub(crate) transcript: Vec<ChatMessage>,
    #[serde(skip)]
    pub(crate) defaults: SessionDefaults,
}

impl Session {
    #[must_use]
    pub fn new(defaults: SessionDefaults) -> Self {
        Self {
            defaults,
            ..Self::default()
        }
    }

    /// Replace the use-time defaults (not persisted with the session).
    #[must_use]
    pub fn with_defaults(mut self, defaults: SessionDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    // -----------------------------------------------------------------------
    // Setup & mode
    // -----------------------------------------------------------------------

    #[must_use]
    pub const fn setup(&self) -> &Setup {
        &self.setup
    }

    pub fn set_setup(&mut self, setup: Setup) {
        tracing::info!(store_id = %setup.store_id, "session: setup replaced");
        self.setup = setup;
    }

    #[must_use]
    pub const fn advanced_mode(&self) -> bool {
        self.advanced_mode
    }

    pub fn set_advanced_mode(&mut self, advanced: bool) {
        self.advanced_mode = advanced;
    }

    #[must_use]
    pub const fn defaults(&self) -> &SessionDefaults {
        &self.defaults
    }

    /// Store identifier from the setup, or the configured default.
    #[must_use]
    pub fn store_id(&self) -> &str {
        if self.setup.store_id.trim().is_empty() {
            &self.defaults.store_key
        } else {
            &self.setup.store_id
        }
    }

    // -----------------------------------------------------------------------
    // Settings
    // -----------------------------------------------------------------------

    /// Mode-appropriate settings value.
    #[must_use]
    pub fn settings(&self) -> Settings {
        self.settings.project(self.advanced_mode)
    }

    /// Every field, both tiers, regardless of mode.
    #[must_use]
    pub const fn combined_settings(&self) -> &CombinedSettings {
        &self.settings
    }

    /// Set one field by name from a JSON value; `Value::Null` clears it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Constraint` for an unknown field, a malformed
    /// value, or a rule the result would break. Settings are unchanged on
    /// error.
    pub fn set_setting(&mut self, field: &str, value: Value) -> Result<(), SessionError> {
        self.settings.set_field(field, value)?;
        tracing::info!(field, "session: setting updated");
        Ok(())
    }

    /// # Errors
    ///
    /// Same as [`Session::set_setting`].
    pub fn clear_setting(&mut self, field: &str) -> Result<(), SessionError> {
        self.set_setting(field, Value::Null)
    }

    /// Results per query: the settings value, or the session default.
    #[must_use]
    pub fn results_per_query(&self) -> u32 {
        self.settings
            .simple
            .effective_results_per_query(self.defaults.results_per_query)
    }

    #[must_use]
    pub fn queries_to_generate(&self) -> u32 {
        self.settings
            .simple
            .effective_queries_to_generate(self.defaults.queries_to_generate)
    }

    // -----------------------------------------------------------------------
    // Queries & edit buffers
    // -----------------------------------------------------------------------

    #[must_use]
    pub const fn queries(&self) -> &QueryStore {
        &self.queries
    }

    /// Add a query and seed its edit buffer with the same text.
    pub fn add_query(&mut self, text: impl Into<String>) -> Query {
        let query = self.queries.add(text).clone();
        self.editor_buffers
            .insert(query.id.clone(), query.text.clone());
        query
    }

    /// Replace a query's text directly, keeping its buffer in step.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::QueryNotFound` for an unknown id.
    pub fn edit_query(&mut self, id: &str, text: impl Into<String>) -> Result<(), SessionError> {
        let text = text.into();
        self.queries.set_text(id, text.clone())?;
        self.editor_buffers.insert(id.to_string(), text);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `SessionError::QueryNotFound` for an unknown id.
    pub fn set_selected(&mut self, id: &str, selected: bool) -> Result<(), SessionError> {
        self.queries.set_selected(id, selected)
    }

    /// Soft delete.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::QueryNotFound` for an unknown id.
    pub fn delete_query(&mut self, id: &str) -> Result<(), SessionError> {
        self.queries.hide(id)?;
        tracing::info!(id, "session: query hidden");
        Ok(())
    }

    #[must_use]
    pub const fn editor_buffers(&self) -> &BTreeMap<String, String> {
        &self.editor_buffers
    }

    /// Write to a query's edit buffer without touching the query.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::QueryNotFound` for an unknown id.
    pub fn edit_buffer(&mut self, id: &str, text: impl Into<String>) -> Result<(), SessionError> {
        if self.queries.get(id).is_none() {
            return Err(SessionError::QueryNotFound { id: id.to_string() });
        }
        self.editor_buffers.insert(id.to_string(), text.into());
        Ok(())
    }

    /// Copy each displayed query's buffer into its text. Returns how many
    /// queries changed.
    pub fn sync_buffers(&mut self) -> usize {
        let updates: Vec<(String, String)> = self
            .queries
            .visible()
            .filter_map(|q| {
                self.editor_buffers
                    .get(&q.id)
                    .filter(|buffer| **buffer != q.text)
                    .map(|buffer| (q.id.clone(), buffer.clone()))
            })
            .collect();
        for (id, text) in &updates {
            // ids come from the store itself
            let _ = self.queries.set_text(id, text.clone());
        }
        updates.len()
    }

    // -----------------------------------------------------------------------
    // History
    // -----------------------------------------------------------------------

    #[must_use]
    pub fn history(&self) -> &[ExecutionRecord] {
        self.cache.history()
    }

    #[must_use]
    pub const fn cache(&self) -> &ExecutionCache {
        &self.cache
    }

    #[must_use]
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }
}
