//! `esearch` / `esummary` JSON shapes and their mapping to `Article`.

use std::collections::HashMap;

use chrono::NaiveDate;
use pmr_core::entities::Article;
use serde::Deserialize;

use crate::error::PubMedError;

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub esearchresult: SearchResult,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResult {
    #[serde(default)]
    pub idlist: Vec<String>,
    #[serde(rename = "ERROR")]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SummaryResponse {
    /// `uids` plus one document per PMID.
    pub result: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SummaryDoc {
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub pubdate: String,
    #[serde(default)]
    pub sortpubdate: String,
    #[serde(default)]
    pub authors: Vec<SummaryAuthor>,
    #[serde(default)]
    pub pubtype: Vec<String>,
    #[serde(default)]
    pub articleids: Vec<ArticleId>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SummaryAuthor {
    pub name: String,
    #[serde(default)]
    pub authtype: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ArticleId {
    pub idtype: String,
    pub value: String,
}

impl SummaryResponse {
    /// Documents in the order of `ids`; ids missing from the response are
    /// dropped.
    pub fn articles(mut self, ids: &[String]) -> Result<Vec<Article>, PubMedError> {
        let mut articles = Vec::with_capacity(ids.len());
        for id in ids {
            let Some(value) = self.result.remove(id) else {
                tracing::debug!(pmid = %id, "pubmed: summary missing for id");
                continue;
            };
            let doc: SummaryDoc = serde_json::from_value(value)
                .map_err(|e| PubMedError::Parse(format!("esummary {id}: {e}")))?;
            articles.push(doc.into_article());
        }
        Ok(articles)
    }
}

impl SummaryDoc {
    pub fn into_article(self) -> Article {
        let id_of = |kind: &str| {
            self.articleids
                .iter()
                .find(|aid| aid.idtype == kind && !aid.value.is_empty())
                .map(|aid| aid.value.clone())
        };
        let doi = id_of("doi");
        let pmc = id_of("pmc");
        let pub_date = parse_pub_date(&self.sortpubdate, &self.pubdate);

        Article {
            is_free: pmc.is_some(),
            pmid: self.uid,
            title: self.title,
            authors: self
                .authors
                .into_iter()
                .filter(|a| a.authtype.is_empty() || a.authtype == "Author")
                .map(|a| a.name)
                .collect(),
            journal: self.source,
            pub_date,
            doi,
            pmc,
            publication_types: self.pubtype,
            ..Article::default()
        }
        .with_author_roles()
    }
}

/// `sortpubdate` is `YYYY/MM/DD HH:MM`; `pubdate` starts with the year.
fn parse_pub_date(sortpubdate: &str, pubdate: &str) -> Option<NaiveDate> {
    sortpubdate
        .get(..10)
        .and_then(|day| NaiveDate::parse_from_str(day, "%Y/%m/%d").ok())
        .or_else(|| {
            pubdate
                .get(..4)
                .and_then(|year| year.parse::<i32>().ok())
                .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
        })
}
