//! # pmr-pubmed
//!
//! PubMed search over the NCBI E-utilities JSON endpoints.
//!
//! A fetch is three requests: `esearch` resolves the query to PMIDs in
//! relevance order, `esummary` returns citation metadata for those PMIDs,
//! and `efetch` returns the full XML records, which supply the abstract,
//! keywords, MeSH terms and affiliations. Both are mapped onto
//! [`pmr_core::entities::Article`].

mod client;
mod efetch;
mod error;
mod http;
mod summary;

pub use client::PubMedClient;
pub use error::PubMedError;
