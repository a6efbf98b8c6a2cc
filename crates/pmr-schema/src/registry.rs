//! Central schema registry for all persisted and structured-completion types.
//!
//! The `SchemaRegistry` builds JSON Schemas from pmr-core types at
//! construction time using [`schemars::schema_for!`] and validates with
//! `jsonschema`.

use std::collections::HashMap;

use schemars::schema_for;

use crate::error::SchemaError;

/// Central store of every JSON Schema the workspace uses.
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, serde_json::Value>,
}

/// Insert a schema into the map, converting the `schemars` output to a
/// `serde_json::Value`. Panics if `serde_json::to_value` fails (should be
/// infallible for valid `schemars` output).
macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        $map.insert($name, serde_json::to_value(schema_for!($ty)).unwrap());
    };
}

impl SchemaRegistry {
    /// Build a new registry with every entity and completion-response schema.
    ///
    /// # Panics
    ///
    /// Panics if `serde_json::to_value` fails on any `schemars`-generated
    /// schema. This is not expected in practice because `schemars` always
    /// produces valid JSON-serialisable output.
    #[must_use]
    pub fn new() -> Self {
        let mut schemas = HashMap::new();

        // --- Entity types (10) ---
        register!(schemas, "setup", pmr_core::entities::Setup);
        register!(schemas, "simple_tier", pmr_core::entities::SimpleTier);
        register!(
            schemas,
            "combined_settings",
            pmr_core::entities::CombinedSettings
        );
        register!(schemas, "settings", pmr_core::entities::Settings);
        register!(schemas, "query", pmr_core::entities::Query);
        register!(schemas, "article", pmr_core::entities::Article);
        register!(
            schemas,
            "execution_record",
            pmr_core::entities::ExecutionRecord
        );
        register!(schemas, "chat_message", pmr_core::entities::ChatMessage);
        register!(
            schemas,
            "session_snapshot",
            pmr_core::entities::SessionSnapshot
        );
        register!(schemas, "saved_row", pmr_core::entities::SavedRow);

        // --- Completion responses (4) ---
        register!(
            schemas,
            "simple_settings_response",
            pmr_core::protocol::SimpleSettingsResponse
        );
        register!(
            schemas,
            "advanced_settings_response",
            pmr_core::protocol::AdvancedSettingsResponse
        );
        register!(
            schemas,
            "query_list_response",
            pmr_core::protocol::QueryListResponse
        );
        register!(
            schemas,
            "summary_response",
            pmr_core::protocol::SummaryResponse
        );

        Self { schemas }
    }

    /// Get a schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.schemas.get(name)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown, or
    /// `SchemaError::ValidationFailed` if validation produces errors.
    pub fn validate(&self, name: &str, instance: &serde_json::Value) -> Result<(), SchemaError> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let validator = jsonschema::validator_for(schema)
            .map_err(|e| SchemaError::Generation(format!("{e}")))?;

        let errors: Vec<String> = validator
            .iter_errors(instance)
            .map(|e| format!("{e}"))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }

    /// List all registered schema names.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Number of registered schemas.
    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
