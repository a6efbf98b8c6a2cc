//! Completion client error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// No API key configured.
    #[error("completion provider is not configured (set llm.api_key)")]
    NotConfigured,

    /// The provider rejected the credentials (401).
    #[error("authentication failed")]
    Auth,

    /// The provider returned 429.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// Any other non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The envelope or the message content could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// The message content did not satisfy the response schema.
    #[error("schema error: {0}")]
    Schema(#[from] pmr_schema::SchemaError),
}
