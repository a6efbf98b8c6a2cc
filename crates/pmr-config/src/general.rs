//! General application configuration.

use serde::{Deserialize, Serialize};

/// Results fetched per query when the settings leave it unconstrained.
const fn default_results_per_query() -> u32 {
    15
}

/// Queries generated per chat turn when the settings leave it unconstrained.
const fn default_queries_to_generate() -> u32 {
    10
}

fn default_session_file() -> String {
    ".pubmedr/session.json".into()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Start new sessions with the advanced settings tier visible.
    #[serde(default)]
    pub advanced_mode: bool,

    #[serde(default = "default_results_per_query")]
    pub results_per_query: u32,

    #[serde(default = "default_queries_to_generate")]
    pub queries_to_generate: u32,

    /// Where the CLI keeps the live session between invocations.
    #[serde(default = "default_session_file")]
    pub session_file: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            advanced_mode: false,
            results_per_query: default_results_per_query(),
            queries_to_generate: default_queries_to_generate(),
            session_file: default_session_file(),
        }
    }
}
