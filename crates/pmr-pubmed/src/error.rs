//! PubMed client error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PubMedError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// E-utilities returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// Failed to parse an E-utilities response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The query was rejected by `esearch`.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// E-utilities returned 429 Too Many Requests.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },
}
