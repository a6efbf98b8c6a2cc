//! NCBI E-utilities configuration.

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "https://eutils.ncbi.nlm.nih.gov/entrez/eutils".into()
}

fn default_tool() -> String {
    "pubmedr".into()
}

const fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PubMedConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Optional NCBI API key (raises the rate limit).
    #[serde(default)]
    pub api_key: String,

    /// `tool` parameter NCBI asks clients to send.
    #[serde(default = "default_tool")]
    pub tool: String,

    /// Contact `email` parameter NCBI asks clients to send.
    #[serde(default)]
    pub email: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for PubMedConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            tool: default_tool(),
            email: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl PubMedConfig {
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }
}
