//! # pmr-core
//!
//! Core types, validation, and collaborator contracts for the PubMed query
//! workspace.
//!
//! This crate provides the foundational types shared across all pmr crates:
//! - Entity structs for the session data model (setup, settings, queries,
//!   articles, execution records, snapshots, saved results)
//! - Search-constraint enums carrying their PubMed tag spellings
//! - Constraint validation with all-violations reporting
//! - Structured-completion request/response types
//! - The three collaborator traits (completion, article fetch, durable store)

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod ports;
pub mod protocol;
