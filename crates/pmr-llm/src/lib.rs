//! # pmr-llm
//!
//! Structured completion over an OpenAI-compatible `chat/completions`
//! endpoint.
//!
//! Every call sends the request's registry schema as a `json_schema`
//! response format, validates the returned content against that same schema,
//! and only then decodes it into a `TypedResponse`.

mod client;
mod error;

pub use client::ChatCompletionsClient;
pub use error::LlmError;
