use std::path::PathBuf;

use anyhow::Context;
use pmr_config::PmrConfig;
use pmr_llm::ChatCompletionsClient;
use pmr_pubmed::PubMedClient;
use pmr_session::Session;
use pmr_store::JsonlStore;

use crate::bootstrap;
use crate::cli::GlobalFlags;

/// The live session plus the configuration its collaborators are built from.
///
/// Collaborators are built on demand so commands that never reach the
/// network never need an API key.
pub struct AppContext {
    pub config: PmrConfig,
    pub session: Session,
    pub session_path: PathBuf,
}

impl AppContext {
    /// Load the session file named by `--session` or the config.
    pub fn load(config: PmrConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        let session_path = bootstrap::session_path(&config, flags);
        let session = Session::load_or_new(&session_path, bootstrap::session_defaults(&config))
            .with_context(|| format!("failed to read session file {}", session_path.display()))?;
        Ok(Self {
            config,
            session,
            session_path,
        })
    }

    pub fn save_session(&self) -> anyhow::Result<()> {
        self.session
            .save(&self.session_path)
            .with_context(|| format!("failed to write session file {}", self.session_path.display()))
    }

    pub fn completer(&self) -> anyhow::Result<ChatCompletionsClient> {
        ChatCompletionsClient::new(&self.config.llm)
            .context("LLM is not available (set PUBMEDR_LLM__API_KEY or [llm] api_key)")
    }

    pub fn fetcher(&self) -> anyhow::Result<PubMedClient> {
        PubMedClient::new(&self.config.pubmed).context("failed to build the PubMed client")
    }

    pub fn store(&self) -> anyhow::Result<JsonlStore> {
        JsonlStore::open(&self.config.store.dir)
            .with_context(|| format!("failed to open store at {}", self.config.store.dir))
    }
}
