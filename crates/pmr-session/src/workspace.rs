//! Whole-session workspace file.
//!
//! Unlike a snapshot, this keeps everything (every query, the execution
//! cache, and the transcript) so a single logical session survives between
//! CLI invocations.

use std::fs;
use std::path::Path;

use crate::error::SessionError;
use crate::state::{Session, SessionDefaults};

impl Session {
    /// Load the session at `path`, or start a fresh one if the file does not
    /// exist.
    ///
    /// # Errors
    ///
    /// - `Workspace` if the file exists but cannot be read
    /// - `Snapshot` if its contents are not a session
    pub fn load_or_new(path: &Path, defaults: SessionDefaults) -> Result<Self, SessionError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "workspace: no session file, starting fresh");
            return Ok(Self::new(defaults));
        }
        let text = fs::read_to_string(path)?;
        let session: Self = serde_json::from_str(&text)?;
        tracing::debug!(
            path = %path.display(),
            queries = session.queries.len(),
            "workspace: session loaded"
        );
        Ok(session.with_defaults(defaults))
    }

    /// Write the whole session as pretty JSON, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns `Workspace` on I/O failure.
    pub fn save(&self, path: &Path) -> Result<(), SessionError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)?;
        tracing::debug!(path = %path.display(), "workspace: session saved");
        Ok(())
    }

    /// Delete the session file, if any.
    ///
    /// # Errors
    ///
    /// Returns `Workspace` if the file exists and cannot be removed.
    pub fn discard(path: &Path) -> Result<bool, SessionError> {
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(path)?;
        tracing::info!(path = %path.display(), "workspace: session discarded");
        Ok(true)
    }
}
