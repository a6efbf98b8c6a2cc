//! In-memory collaborators for engine tests.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use pmr_core::entities::Article;
use pmr_core::ports::{ArticleFetcher, DurableStore, Record, StructuredCompleter};
use pmr_core::protocol::{CompletionRequest, TypedResponse};

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct FakeError(pub String);

/// Returns one article per query unless told otherwise; records every call.
#[derive(Default)]
pub struct FakeFetcher {
    calls: Mutex<Vec<String>>,
    failures: Mutex<VecDeque<String>>,
    responses: Mutex<HashMap<String, Vec<Article>>>,
}

impl FakeFetcher {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn fail_next(&self, reason: &str) {
        self.failures.lock().unwrap().push_back(reason.to_string());
    }

    pub fn respond_with(&self, query: &str, articles: Vec<Article>) {
        self.responses
            .lock()
            .unwrap()
            .insert(query.to_string(), articles);
    }
}

#[async_trait]
impl ArticleFetcher for FakeFetcher {
    type Error = FakeError;

    async fn fetch(&self, query: &str, _max_results: u32) -> Result<Vec<Article>, FakeError> {
        self.calls.lock().unwrap().push(query.to_string());
        if let Some(reason) = self.failures.lock().unwrap().pop_front() {
            return Err(FakeError(reason));
        }
        if let Some(articles) = self.responses.lock().unwrap().get(query) {
            return Ok(articles.clone());
        }
        Ok(vec![Article {
            pmid: format!("{}", query.len()),
            title: format!("Result for {query}"),
            ..Article::default()
        }])
    }
}

/// Replays queued responses in order; records every request.
#[derive(Default)]
pub struct FakeCompleter {
    requests: Mutex<Vec<CompletionRequest>>,
    responses: Mutex<VecDeque<Result<TypedResponse, String>>>,
}

impl FakeCompleter {
    pub fn replying(response: TypedResponse) -> Self {
        let completer = Self::default();
        completer.push(Ok(response));
        completer
    }

    pub fn failing(reason: &str) -> Self {
        let completer = Self::default();
        completer.push(Err(reason.to_string()));
        completer
    }

    pub fn push(&self, response: Result<TypedResponse, String>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl StructuredCompleter for FakeCompleter {
    type Error = FakeError;

    async fn complete(&self, request: &CompletionRequest) -> Result<TypedResponse, FakeError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err("no response queued".into()))
            .map_err(FakeError)
    }
}

/// Keyed append log in memory; can be switched to fail every call.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<BTreeMap<String, Vec<Record>>>,
    broken: Mutex<bool>,
}

impl MemoryStore {
    pub fn broken() -> Self {
        let store = Self::default();
        *store.broken.lock().unwrap() = true;
        store
    }

    pub fn records(&self, key: &str) -> Vec<Record> {
        self.records
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .unwrap_or_default()
    }

    fn check(&self) -> Result<(), FakeError> {
        if *self.broken.lock().unwrap() {
            Err(FakeError("store unavailable".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl DurableStore for MemoryStore {
    type Error = FakeError;

    async fn write(&self, key: &str, record: &Record) -> Result<String, FakeError> {
        self.check()?;
        let mut records = self.records.lock().unwrap();
        let entries = records.entry(key.to_string()).or_default();
        entries.push(record.clone());
        Ok(format!("v{}", entries.len()))
    }

    async fn read_latest(&self, key: &str) -> Result<Option<Record>, FakeError> {
        self.check()?;
        Ok(self.records(key).pop())
    }

    async fn read_all(&self, key: &str) -> Result<Vec<Record>, FakeError> {
        self.check()?;
        Ok(self.records(key))
    }
}
