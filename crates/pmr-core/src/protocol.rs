//! Structured-completion protocol: request context, wire response shapes,
//! and the typed result the session applies.
//!
//! A [`CompletionRequest`] knows its refinement mode, its system prompt, the
//! user message to send, the name of the response schema the completer must
//! enforce, and how to turn the validated response JSON back into a
//! [`TypedResponse`]. Completers stay transport-only.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::entities::{CombinedSettings, Settings, Setup, SimpleTier};
use crate::enums::RefinementMode;

// ---------------------------------------------------------------------------
// System prompts
// ---------------------------------------------------------------------------

pub const SETTINGS_SYSTEM_PROMPT: &str = "Analyze researcher background/goals and update search \
settings from chat input. Return updated settings and optionally generate initial PubMed queries. \
Provide clear explanations for changes made.";

pub const QUERIES_SYSTEM_PROMPT: &str = "Generate focused, specific PubMed queries based on \
current context and chat input. Use existing queries as reference to create variations and \
alternatives.";

pub const SUMMARY_SYSTEM_PROMPT: &str =
    "Provide a very brief 1-2 sentence summary highlighting key relevance. Be concise.";

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Refine search settings from a chat instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsRefinementRequest {
    pub setup: Setup,
    /// Mode-appropriate current settings; the variant picks the response shape.
    pub current_settings: Settings,
    /// Upper bound on queries suggested alongside the update.
    pub queries_to_generate: u32,
    pub instruction: String,
}

/// Generate new queries from a chat instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRefinementRequest {
    pub setup: Setup,
    pub settings: Settings,
    /// Text of the currently visible queries.
    pub recent_queries: Vec<String>,
    pub queries_to_generate: u32,
    pub instruction: String,
}

/// Free-text question answered in one or two sentences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRequest {
    pub question: String,
}

/// One structured-completion call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CompletionRequest {
    Settings(SettingsRefinementRequest),
    Queries(QueryRefinementRequest),
    Summary(SummaryRequest),
}

impl CompletionRequest {
    #[must_use]
    pub const fn mode(&self) -> RefinementMode {
        match self {
            Self::Settings(_) => RefinementMode::Settings,
            Self::Queries(_) => RefinementMode::Queries,
            Self::Summary(_) => RefinementMode::Summary,
        }
    }

    #[must_use]
    pub const fn system_prompt(&self) -> &'static str {
        match self {
            Self::Settings(_) => SETTINGS_SYSTEM_PROMPT,
            Self::Queries(_) => QUERIES_SYSTEM_PROMPT,
            Self::Summary(_) => SUMMARY_SYSTEM_PROMPT,
        }
    }

    /// Registry name of the JSON Schema the response must satisfy.
    #[must_use]
    pub const fn response_schema_name(&self) -> &'static str {
        match self {
            Self::Settings(request) => {
                if request.current_settings.is_advanced() {
                    "advanced_settings_response"
                } else {
                    "simple_settings_response"
                }
            }
            Self::Queries(_) => "query_list_response",
            Self::Summary(_) => "summary_response",
        }
    }

    /// User message content. Structured modes send compact JSON with unset
    /// fields omitted; the summary mode sends the question verbatim.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Settings(request) => json!({
                "setup": request.setup,
                "current_settings": settings_fields(&request.current_settings),
                "queries_to_generate": request.queries_to_generate,
                "chat_input": request.instruction,
            })
            .to_string(),
            Self::Queries(request) => json!({
                "setup": request.setup,
                "search_settings": settings_fields(&request.settings),
                "recent_queries": request.recent_queries,
                "queries_to_generate": request.queries_to_generate,
                "chat_input": request.instruction,
            })
            .to_string(),
            Self::Summary(request) => request.question.clone(),
        }
    }

    /// Decode validated response JSON into the typed result for this mode.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if `value` does not match the mode's shape.
    pub fn parse_response(&self, value: Value) -> Result<TypedResponse, serde_json::Error> {
        match self {
            Self::Settings(request) if request.current_settings.is_advanced() => {
                let response: AdvancedSettingsResponse = serde_json::from_value(value)?;
                Ok(TypedResponse::SettingsUpdate {
                    settings: Settings::Advanced(response.updated_settings),
                    queries: response.queries,
                })
            }
            Self::Settings(_) => {
                let response: SimpleSettingsResponse = serde_json::from_value(value)?;
                Ok(TypedResponse::SettingsUpdate {
                    settings: Settings::Simple(response.updated_settings),
                    queries: response.queries,
                })
            }
            Self::Queries(_) => {
                let response: QueryListResponse = serde_json::from_value(value)?;
                Ok(TypedResponse::QueryList(response.queries))
            }
            Self::Summary(_) => {
                let response: SummaryResponse = serde_json::from_value(value)?;
                Ok(TypedResponse::Answer(response.answer.unwrap_or_default()))
            }
        }
    }
}

fn settings_fields(settings: &Settings) -> Value {
    let fields = match settings {
        Settings::Simple(simple) => serde_json::to_value(simple),
        Settings::Advanced(combined) => serde_json::to_value(combined),
    };
    fields.unwrap_or(Value::Null)
}

// ---------------------------------------------------------------------------
// Wire responses
// ---------------------------------------------------------------------------

/// A suggested query as returned by the completer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct QuerySuggestion {
    /// PubMed query string with proper syntax and formatting.
    #[serde(default)]
    pub query_text: String,
}

impl QuerySuggestion {
    pub fn new(query_text: impl Into<String>) -> Self {
        Self {
            query_text: query_text.into(),
        }
    }
}

/// Settings-refinement response in simple mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SimpleSettingsResponse {
    pub updated_settings: SimpleTier,
    /// Generated PubMed queries with proper syntax.
    #[serde(default)]
    pub queries: Vec<QuerySuggestion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// Settings-refinement response in advanced mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AdvancedSettingsResponse {
    pub updated_settings: CombinedSettings,
    /// Generated PubMed queries with proper syntax.
    #[serde(default)]
    pub queries: Vec<QuerySuggestion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct QueryListResponse {
    #[serde(default)]
    pub queries: Vec<QuerySuggestion>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SummaryResponse {
    /// Brief 1-2 sentence summary highlighting key relevance for the researcher.
    #[serde(default)]
    pub answer: Option<String>,
}

// ---------------------------------------------------------------------------
// TypedResponse
// ---------------------------------------------------------------------------

/// Result of a structured-completion call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypedResponse {
    /// Partial settings update, optionally with new queries.
    SettingsUpdate {
        settings: Settings,
        queries: Vec<QuerySuggestion>,
    },
    /// New queries only.
    QueryList(Vec<QuerySuggestion>),
    /// Free-text answer.
    Answer(String),
}

impl TypedResponse {
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::SettingsUpdate { .. } => "settings_update",
            Self::QueryList(_) => "query_list",
            Self::Answer(_) => "answer",
        }
    }
}
