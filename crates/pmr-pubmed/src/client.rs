//! E-utilities HTTP client.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use pmr_config::PubMedConfig;
use pmr_core::entities::Article;
use pmr_core::ports::ArticleFetcher;

use crate::efetch::{ArticleDetails, parse_article_set};
use crate::error::PubMedError;
use crate::http::check_response;
use crate::summary::{SearchResponse, SummaryResponse};

/// PubMed search client.
pub struct PubMedClient {
    http: reqwest::Client,
    base_url: String,
    /// `&tool=..&email=..&api_key=..`, already encoded; empty when unset.
    identity: String,
}

impl PubMedClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PubMedError::Http`] if the underlying `reqwest::Client`
    /// fails to build.
    pub fn new(config: &PubMedConfig) -> Result<Self, PubMedError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("pubmedr/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let mut identity = String::new();
        for (name, value) in [
            ("tool", &config.tool),
            ("email", &config.email),
            ("api_key", &config.api_key),
        ] {
            if !value.is_empty() {
                identity.push_str(&format!("&{name}={}", urlencoding::encode(value)));
            }
        }

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            identity,
        })
    }

    /// PMIDs matching `query`, in relevance order.
    ///
    /// # Errors
    ///
    /// Returns [`PubMedError::InvalidQuery`] when `esearch` reports a query
    /// error, and transport, status, or parse errors otherwise.
    pub async fn search_ids(&self, query: &str, max_results: u32) -> Result<Vec<String>, PubMedError> {
        let url = format!(
            "{}/esearch.fcgi?db=pubmed&retmode=json&sort=relevance&retmax={max_results}&term={}{}",
            self.base_url,
            urlencoding::encode(query),
            self.identity
        );
        tracing::debug!(query, max_results, "pubmed: esearch");
        let resp = check_response(self.http.get(&url).send().await?).await?;
        let data: SearchResponse = resp
            .json()
            .await
            .map_err(|e| PubMedError::Parse(format!("esearch: {e}")))?;

        if let Some(error) = data.esearchresult.error {
            return Err(PubMedError::InvalidQuery(error));
        }
        Ok(data.esearchresult.idlist)
    }

    /// Summary metadata for `ids`, preserving their order.
    ///
    /// # Errors
    ///
    /// Returns transport, status, or parse errors.
    pub async fn summaries(&self, ids: &[String]) -> Result<Vec<Article>, PubMedError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let url = format!(
            "{}/esummary.fcgi?db=pubmed&retmode=json&id={}{}",
            self.base_url,
            ids.join(","),
            self.identity
        );
        tracing::debug!(count = ids.len(), "pubmed: esummary");
        let resp = check_response(self.http.get(&url).send().await?).await?;
        let data: SummaryResponse = resp
            .json()
            .await
            .map_err(|e| PubMedError::Parse(format!("esummary: {e}")))?;
        data.articles(ids)
    }

    /// Abstract, keywords, MeSH terms and affiliations for `ids`, keyed by
    /// PMID, from the full `efetch` XML records.
    ///
    /// # Errors
    ///
    /// Returns transport, status, or XML parse errors.
    pub(crate) async fn details(&self, ids: &[String]) -> Result<HashMap<String, ArticleDetails>, PubMedError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let url = format!(
            "{}/efetch.fcgi?db=pubmed&retmode=xml&id={}{}",
            self.base_url,
            ids.join(","),
            self.identity
        );
        tracing::debug!(count = ids.len(), "pubmed: efetch");
        let resp = check_response(self.http.get(&url).send().await?).await?;
        let body = resp.text().await?;
        parse_article_set(&body)
    }
}

#[async_trait]
impl ArticleFetcher for PubMedClient {
    type Error = PubMedError;

    async fn fetch(&self, query: &str, max_results: u32) -> Result<Vec<Article>, Self::Error> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        let ids = self.search_ids(query, max_results).await?;
        let mut articles = self.summaries(&ids).await?;
        let mut details = self.details(&ids).await?;
        for article in &mut articles {
            match details.remove(&article.pmid) {
                Some(found) => found.apply_to(article),
                None => tracing::debug!(pmid = %article.pmid, "pubmed: no full record"),
            }
        }
        Ok(articles)
    }
}
