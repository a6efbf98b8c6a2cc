//! In-memory collaborators for end-to-end session tests.

#![allow(dead_code)]

use std::collections::{BTreeMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use pmr_core::entities::Article;
use pmr_core::ports::{ArticleFetcher, DurableStore, Record, StructuredCompleter};
use pmr_core::protocol::{CompletionRequest, TypedResponse};

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct Failure(pub String);

/// Returns the scripted articles for a query, or nothing.
#[derive(Default)]
pub struct ScriptedFetcher {
    pub calls: Mutex<Vec<String>>,
    pub articles: BTreeMap<String, Vec<Article>>,
}

impl ScriptedFetcher {
    pub fn with(mut self, query: &str, articles: Vec<Article>) -> Self {
        self.articles.insert(query.to_string(), articles);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ArticleFetcher for ScriptedFetcher {
    type Error = Failure;

    async fn fetch(&self, query: &str, _max_results: u32) -> Result<Vec<Article>, Failure> {
        self.calls.lock().unwrap().push(query.to_string());
        Ok(self.articles.get(query).cloned().unwrap_or_default())
    }
}

/// Replays responses in order.
#[derive(Default)]
pub struct ScriptedCompleter {
    pub responses: Mutex<VecDeque<Result<TypedResponse, String>>>,
    pub requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedCompleter {
    pub fn then(self, response: Result<TypedResponse, &str>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(response.map_err(str::to_string));
        self
    }
}

#[async_trait]
impl StructuredCompleter for ScriptedCompleter {
    type Error = Failure;

    async fn complete(&self, request: &CompletionRequest) -> Result<TypedResponse, Failure> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err("exhausted".into()))
            .map_err(Failure)
    }
}

#[derive(Default)]
pub struct VecStore {
    pub records: Mutex<BTreeMap<String, Vec<Record>>>,
}

#[async_trait]
impl DurableStore for VecStore {
    type Error = Failure;

    async fn write(&self, key: &str, record: &Record) -> Result<String, Failure> {
        let mut records = self.records.lock().unwrap();
        let entries = records.entry(key.to_string()).or_default();
        entries.push(record.clone());
        Ok(entries.len().to_string())
    }

    async fn read_latest(&self, key: &str) -> Result<Option<Record>, Failure> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .get(key)
            .and_then(|entries| entries.last().cloned()))
    }

    async fn read_all(&self, key: &str) -> Result<Vec<Record>, Failure> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .unwrap_or_default())
    }
}

pub fn article(pmid: &str, title: &str) -> Article {
    Article {
        pmid: pmid.to_string(),
        title: title.to_string(),
        authors: vec!["Doktorova T".to_string()],
        first_author: "Doktorova T".to_string(),
        journal: "Toxicology".to_string(),
        ..Article::default()
    }
}
