//! # pmr-schema
//!
//! JSON Schema generation, validation, and registry for the PubMed query
//! workspace.
//!
//! This crate provides:
//! - `SchemaRegistry`: central store of every JSON Schema in the system
//! - Validation of structured-completion responses before they are decoded
//! - Schema export for the `pmr schema` command
//!
//! ## Architecture
//!
//! Types are defined in `pmr-core` with `#[derive(JsonSchema)]`. This crate
//! imports them and provides the registry and validation layer. The
//! completion adapter sends registry schemas as the response format and
//! validates replies against the same schema.

pub mod error;
pub mod registry;

pub use error::SchemaError;
pub use registry::SchemaRegistry;
