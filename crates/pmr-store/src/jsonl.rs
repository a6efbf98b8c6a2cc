//! JSONL-backed `DurableStore`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pmr_core::ports::{DurableStore, Record};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// One appended line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredLine {
    /// `{RFC3339 timestamp}-{sequence}`, sequence being the 1-based line
    /// number within the key's file.
    pub version: String,
    pub written_at: DateTime<Utc>,
    pub fields: Record,
}

/// File stem for `key`: percent-encoded, so distinct keys never share a
/// file and no key can name a path outside the store directory.
#[must_use]
pub fn encode_key(key: &str) -> String {
    urlencoding::encode(key).into_owned()
}

/// Durable store writing one JSONL file per key.
pub struct JsonlStore {
    dir: PathBuf,
}

impl JsonlStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        if key.trim().is_empty() {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.jsonl", encode_key(key))))
    }

    fn lines(path: &Path) -> Result<Vec<StoredLine>, StoreError> {
        if !path.exists() {
            return Ok(Vec::new());
        }
        let lines = serde_jsonlines::json_lines(path)?.collect::<Result<Vec<StoredLine>, _>>()?;
        Ok(lines)
    }
}

#[async_trait]
impl DurableStore for JsonlStore {
    type Error = StoreError;

    async fn write(&self, key: &str, record: &Record) -> Result<String, Self::Error> {
        let path = self.path_for(key)?;
        let sequence = Self::lines(&path)?.len() + 1;
        let written_at = Utc::now();
        let line = StoredLine {
            version: format!("{}-{sequence}", written_at.to_rfc3339()),
            written_at,
            fields: record.clone(),
        };
        serde_jsonlines::append_json_lines(&path, [&line])?;
        tracing::debug!(key, version = %line.version, "store: appended record");
        Ok(line.version)
    }

    async fn read_latest(&self, key: &str) -> Result<Option<Record>, Self::Error> {
        let path = self.path_for(key)?;
        Ok(Self::lines(&path)?.pop().map(|line| line.fields))
    }

    async fn read_all(&self, key: &str) -> Result<Vec<Record>, Self::Error> {
        let path = self.path_for(key)?;
        Ok(Self::lines(&path)?
            .into_iter()
            .map(|line| line.fields)
            .collect())
    }
}
