//! Durable store configuration.

use serde::{Deserialize, Serialize};

fn default_dir() -> String {
    ".pubmedr/store".into()
}

fn default_key() -> String {
    "pubmedr".into()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Directory holding one JSONL file per store key.
    #[serde(default = "default_dir")]
    pub dir: String,

    /// Store identifier used when the session setup names none.
    #[serde(default = "default_key")]
    pub default_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            default_key: default_key(),
        }
    }
}
