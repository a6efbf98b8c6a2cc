use std::path::PathBuf;

use anyhow::Context;
use pmr_config::PmrConfig;
use pmr_session::SessionDefaults;

use crate::cli::GlobalFlags;

/// Load `.env`, then the layered configuration, and range-check it.
pub fn load_config() -> anyhow::Result<PmrConfig> {
    let config = PmrConfig::load_with_dotenv().context("failed to load pmr configuration")?;
    config.validate()?;
    warn_unconfigured(&config);
    Ok(config)
}

/// Session file from `--session`, else from config.
#[must_use]
pub fn session_path(config: &PmrConfig, flags: &GlobalFlags) -> PathBuf {
    flags
        .session
        .as_deref()
        .map_or_else(|| PathBuf::from(&config.general.session_file), PathBuf::from)
}

#[must_use]
pub fn session_defaults(config: &PmrConfig) -> SessionDefaults {
    SessionDefaults {
        results_per_query: config.general.results_per_query,
        queries_to_generate: config.general.queries_to_generate,
        store_key: config.store.default_key.clone(),
    }
}

fn warn_unconfigured(config: &PmrConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &PmrConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();
    let mut warnings = Vec::new();

    if !config.llm.is_configured() && has_env_prefix(&env_keys, "PUBMEDR_LLM") {
        warnings.push(
            "LLM config appears default while PUBMEDR_LLM* env vars exist. Use double underscores (example: PUBMEDR_LLM__API_KEY)."
                .to_string(),
        );
    }
    if !config.pubmed.has_api_key() && has_env_prefix(&env_keys, "PUBMEDR_PUBMED") {
        warnings.push(
            "PubMed API key appears unset while PUBMEDR_PUBMED* env vars exist. Use double underscores (example: PUBMEDR_PUBMED__API_KEY)."
                .to_string(),
        );
    }

    warnings
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter()
        .any(|key| key.starts_with(prefix) && !key.starts_with(&format!("{prefix}__")))
}
