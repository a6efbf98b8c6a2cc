//! # pmr-config
//!
//! Layered configuration loading for the PubMed query workspace using
//! figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`PUBMEDR_*` prefix, `__` as separator)
//! 2. Project-level `.pubmedr/config.toml`
//! 3. User-level `~/.config/pubmedr/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `PUBMEDR_LLM__API_KEY` -> `llm.api_key`,
//! `PUBMEDR_PUBMED__EMAIL` -> `pubmed.email`, etc. The `__` (double
//! underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use pmr_config::PmrConfig;
//!
//! let config = PmrConfig::load_with_dotenv().expect("config");
//! if config.llm.is_configured() {
//!     println!("model: {}", config.llm.model);
//! }
//! ```

mod error;
mod general;
mod llm;
mod pubmed;
mod store;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use llm::LlmConfig;
pub use pubmed::PubMedConfig;
pub use store::StoreConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use pmr_core::entities::{QUERIES_TO_GENERATE_RANGE, RESULTS_PER_QUERY_RANGE};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix for every config key.
pub const ENV_PREFIX: &str = "PUBMEDR_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PmrConfig {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub pubmed: PubMedConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl PmrConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env`
    /// file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source cannot be parsed or a value
    /// has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on
    /// top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".pubmedr/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("pubmedr").join("config.toml"))
    }

    /// Range-check values the settings model also bounds.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for the first out-of-range field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range(
            "general.results_per_query",
            self.general.results_per_query,
            RESULTS_PER_QUERY_RANGE,
        )?;
        check_range(
            "general.queries_to_generate",
            self.general.queries_to_generate,
            QUERIES_TO_GENERATE_RANGE,
        )?;
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(ConfigError::InvalidValue {
                field: "llm.temperature".into(),
                reason: format!("{} is outside 0.0..=2.0", self.llm.temperature),
            });
        }
        Ok(())
    }
}

fn check_range(field: &str, value: u32, (min, max): (i64, i64)) -> Result<(), ConfigError> {
    if (min..=max).contains(&i64::from(value)) {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: format!("{value} is outside {min}..={max}"),
        })
    }
}
