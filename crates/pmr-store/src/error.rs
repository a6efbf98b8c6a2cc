//! Store error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// File read, append, or directory creation failed.
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The key is empty or whitespace.
    #[error("Invalid store key: {0:?}")]
    InvalidKey(String),
}
