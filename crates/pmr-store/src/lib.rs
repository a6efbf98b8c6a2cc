//! # pmr-store
//!
//! Append-only JSONL implementation of the durable store contract.
//!
//! Each store key maps to `{dir}/{key}.jsonl`, the key percent-encoded. Every write appends one line
//! `{version, written_at, fields}`; reads never rewrite the file. The latest
//! record for a key is its last line.

mod error;
mod jsonl;

pub use error::StoreError;
pub use jsonl::{JsonlStore, StoredLine, encode_key};
