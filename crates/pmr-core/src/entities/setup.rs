use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Researcher identity and context for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Setup {
    /// Researcher background.
    #[serde(default)]
    pub researcher_background: String,
    /// Specific research goal.
    #[serde(default)]
    pub researcher_goal: String,
    /// Durable store identifier that saved results are written under.
    #[serde(default)]
    pub store_id: String,
}

impl Setup {
    /// Whether the researcher has described themselves or their goal.
    #[must_use]
    pub fn has_context(&self) -> bool {
        !self.researcher_background.trim().is_empty() || !self.researcher_goal.trim().is_empty()
    }
}
