//! Chat-completions HTTP client.

use async_trait::async_trait;
use pmr_config::LlmConfig;
use pmr_core::ports::StructuredCompleter;
use pmr_core::protocol::{CompletionRequest, TypedResponse};
use pmr_schema::{SchemaError, SchemaRegistry};
use serde_json::{Value, json};

use crate::error::LlmError;

/// Structured-completion client for any OpenAI-compatible endpoint.
pub struct ChatCompletionsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    schemas: SchemaRegistry,
}

impl ChatCompletionsClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::NotConfigured`] without an API key, or
    /// [`LlmError::Http`] if the `reqwest::Client` fails to build.
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        if !config.is_configured() {
            return Err(LlmError::NotConfigured);
        }
        let http = reqwest::Client::builder()
            .user_agent(concat!("pubmedr/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            schemas: SchemaRegistry::new(),
        })
    }

    fn request_body(&self, request: &CompletionRequest, schema: &Value) -> Value {
        json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": request.system_prompt()},
                {"role": "user", "content": request.user_message()},
            ],
            "temperature": self.temperature,
            "max_tokens": self.max_tokens,
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": request.response_schema_name(),
                    "strict": false,
                    "schema": schema,
                },
            },
        })
    }

    fn map_http_error(status: u16, body: String) -> LlmError {
        match status {
            401 => LlmError::Auth,
            429 => LlmError::RateLimited {
                retry_after_secs: retry_hint(&body).unwrap_or(5),
            },
            _ => LlmError::Api {
                status,
                message: body,
            },
        }
    }
}

/// Seconds from a "... try again in 20s." error message, if present.
fn retry_hint(body: &str) -> Option<u64> {
    let message = serde_json::from_str::<Value>(body).ok()?;
    let text = message.get("error")?.get("message")?.as_str()?;
    let tail = text.rsplit("in ").next()?;
    tail.trim_end_matches('.').trim_end_matches('s').parse().ok()
}

/// The first choice's message content.
fn message_content(envelope: &Value) -> Result<&str, LlmError> {
    envelope
        .get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(Value::as_str)
        .ok_or_else(|| LlmError::Parse("response has no choices[0].message.content".into()))
}

#[async_trait]
impl StructuredCompleter for ChatCompletionsClient {
    type Error = LlmError;

    async fn complete(&self, request: &CompletionRequest) -> Result<TypedResponse, Self::Error> {
        let schema_name = request.response_schema_name();
        let schema = self
            .schemas
            .get(schema_name)
            .ok_or_else(|| SchemaError::NotFound(schema_name.to_string()))?;
        let url = format!("{}/chat/completions", self.base_url);

        tracing::debug!(mode = %request.mode(), schema = schema_name, model = %self.model, "llm: completion request");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(request, schema))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Self::map_http_error(status.as_u16(), body));
        }

        let envelope: Value = serde_json::from_str(&body)
            .map_err(|e| LlmError::Parse(format!("invalid envelope: {e}")))?;
        let content: Value = serde_json::from_str(message_content(&envelope)?)
            .map_err(|e| LlmError::Parse(format!("content is not JSON: {e}")))?;

        self.schemas.validate(schema_name, &content)?;
        let typed = request
            .parse_response(content)
            .map_err(|e| LlmError::Parse(e.to_string()))?;

        tracing::debug!(kind = typed.kind(), "llm: completion response");
        Ok(typed)
    }
}
