//! Frozen, serializable image of the restorable part of a session.
//!
//! The serialized blob is the system of record for persistence: a snapshot
//! read back from its blob must equal the value that produced it in every
//! field. The `v` field supports format versioning; blobs without it
//! deserialize with `v == 1`.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{Query, Settings, Setup};
use crate::errors::CoreError;

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

const fn default_snapshot_version() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SessionSnapshot {
    /// Format version.
    #[serde(default = "default_snapshot_version")]
    pub v: u32,

    pub advanced_mode: bool,

    pub setup: Setup,

    /// Mode-appropriate settings value.
    pub settings: Settings,

    /// The one query this snapshot is about, if any.
    pub query: Option<Query>,

    /// Raw edit-buffer text keyed by query identifier.
    #[serde(default)]
    pub editor_buffers: BTreeMap<String, String>,
}

impl SessionSnapshot {
    /// Serialize to the opaque persisted text form.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Serialization` if encoding fails.
    pub fn to_blob(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a persisted blob.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Serialization` if the blob is not a valid snapshot.
    pub fn from_blob(blob: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(blob)?)
    }
}
