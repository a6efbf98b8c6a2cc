use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ids::new_query_id;

/// A candidate search query and its session flags.
///
/// `displayed == false` is a soft delete: the query stays in the store for
/// the rest of the session but is hidden and never executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Query {
    /// Stable identifier, also the key of the query's edit buffer.
    pub id: String,
    /// PubMed query string.
    pub text: String,
    /// Marked for batch execution.
    pub selected: bool,
    /// Visible in the workspace.
    pub displayed: bool,
}

impl Query {
    /// A fresh, unselected, displayed query.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: new_query_id(),
            text: text.into(),
            selected: false,
            displayed: true,
        }
    }

    /// Displayed and selected.
    #[must_use]
    pub const fn is_runnable(&self) -> bool {
        self.displayed && self.selected
    }
}

impl Default for Query {
    fn default() -> Self {
        Self::new(String::new())
    }
}
