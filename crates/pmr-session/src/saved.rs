//! Saved results and settings snapshots in the durable store.
//!
//! Writes are best-effort: a store failure is reported in the
//! [`SaveReceipt`] and never touches the in-memory session. Reads surface
//! `PersistenceFailure` since there is nothing to fall back to.

use chrono::Utc;
use pmr_core::entities::{Article, SavedResult, SavedRow, SessionSnapshot};
use pmr_core::ports::{DurableStore, Record};
use serde::Serialize;

use crate::error::SessionError;
use crate::snapshot::RestoreReport;
use crate::state::Session;

const SAVED_SUFFIX: &str = "saved";
const SETTINGS_SUFFIX: &str = "settings";

/// Outcome of a best-effort store write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveReceipt {
    pub saved: bool,
    /// Opaque version token from the store on success.
    pub version: Option<String>,
    /// Store failure reason.
    pub error: Option<String>,
}

/// Outcome of loading the latest settings snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoadOutcome {
    Restored(RestoreReport),
    NothingToLoad,
}

impl Session {
    #[must_use]
    pub fn saved_key(&self) -> String {
        format!("{}-{SAVED_SUFFIX}", self.store_id())
    }

    #[must_use]
    pub fn settings_key(&self) -> String {
        format!("{}-{SETTINGS_SUFFIX}", self.store_id())
    }

    /// Save one article with a note, capturing a snapshot focused on the
    /// query that found it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Snapshot` if the snapshot cannot be encoded.
    /// Store failures are reported in the receipt.
    pub async fn save_result<S>(
        &self,
        store: &S,
        article: &Article,
        note: &str,
        query_text: &str,
        results_count: usize,
    ) -> Result<SaveReceipt, SessionError>
    where
        S: DurableStore + ?Sized,
    {
        let snapshot = self.capture_for_text(query_text);
        let saved = SavedResult::new(snapshot, article.clone(), note, query_text, results_count)?;
        let row = saved.to_row(Utc::now());
        let receipt = write_best_effort(store, &self.saved_key(), &row.to_record()).await;
        if receipt.saved {
            tracing::info!(pmid = %article.pmid, "saved: result stored");
        }
        Ok(receipt)
    }

    /// Every saved row, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::PersistenceFailure` if the store read fails.
    pub async fn list_saved<S>(&self, store: &S) -> Result<Vec<SavedRow>, SessionError>
    where
        S: DurableStore + ?Sized,
    {
        let records = store
            .read_all(&self.saved_key())
            .await
            .map_err(persistence_failure)?;
        Ok(records.iter().map(SavedRow::from_record).collect())
    }

    /// Restore the session that produced a saved row.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Snapshot` if the row's blob is missing or
    /// invalid. The session is unchanged on error.
    pub fn restore_saved(&mut self, row: &SavedRow) -> Result<RestoreReport, SessionError> {
        let snapshot = row.snapshot()?;
        Ok(self.restore(snapshot))
    }

    /// Store an ambient snapshot of the current settings.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Snapshot` if the snapshot cannot be encoded.
    pub async fn save_settings<S>(&self, store: &S) -> Result<SaveReceipt, SessionError>
    where
        S: DurableStore + ?Sized,
    {
        let snapshot = self.capture_ambient();
        let record = settings_record(&snapshot)?;
        let receipt = write_best_effort(store, &self.settings_key(), &record).await;
        if receipt.saved {
            tracing::info!(advanced = snapshot.advanced_mode, "saved: settings stored");
        }
        Ok(receipt)
    }

    /// Restore the most recent settings snapshot, if any.
    ///
    /// # Errors
    ///
    /// - `PersistenceFailure` if the store read fails
    /// - `Snapshot` if the stored blob is invalid
    pub async fn load_settings<S>(&mut self, store: &S) -> Result<LoadOutcome, SessionError>
    where
        S: DurableStore + ?Sized,
    {
        let latest = store
            .read_latest(&self.settings_key())
            .await
            .map_err(persistence_failure)?;
        let Some(record) = latest else {
            tracing::debug!(key = %self.settings_key(), "saved: no settings snapshot");
            return Ok(LoadOutcome::NothingToLoad);
        };
        let blob = record
            .get("settings_snapshot")
            .map(String::as_str)
            .unwrap_or_default();
        let snapshot = SessionSnapshot::from_blob(blob)?;
        Ok(LoadOutcome::Restored(self.restore(snapshot)))
    }
}

fn settings_record(snapshot: &SessionSnapshot) -> Result<Record, SessionError> {
    let mut record = Record::new();
    record.insert("settings_snapshot".into(), snapshot.to_blob()?);
    record.insert("is_advanced".into(), snapshot.advanced_mode.to_string());
    record.insert("setup".into(), serde_json::to_string(&snapshot.setup)?);
    record.insert("settings".into(), serde_json::to_string(&snapshot.settings)?);
    record.insert("saved_at".into(), Utc::now().to_rfc3339());
    Ok(record)
}

async fn write_best_effort<S>(store: &S, key: &str, record: &Record) -> SaveReceipt
where
    S: DurableStore + ?Sized,
{
    match store.write(key, record).await {
        Ok(version) => SaveReceipt {
            saved: true,
            version: Some(version),
            error: None,
        },
        Err(e) => {
            tracing::warn!(key, error = %e, "saved: store write failed");
            SaveReceipt {
                saved: false,
                version: None,
                error: Some(e.to_string()),
            }
        }
    }
}

fn persistence_failure(err: impl std::error::Error) -> SessionError {
    tracing::warn!(error = %err, "saved: store read failed");
    SessionError::PersistenceFailure {
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pmr_core::entities::Setup;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::test_support::MemoryStore;

    fn article() -> Article {
        Article {
            pmid: "12345".into(),
            title: "Triclosan and hepatic outcomes".into(),
            authors: vec!["Doktorova T".into(), "Rogiers V".into()],
            journal: "Toxicology".into(),
            pub_date: NaiveDate::from_ymd_opt(2020, 3, 1),
            abstract_text: Some("Abstract.".into()),
            ..Article::default()
        }
    }

    fn session() -> Session {
        let mut session = Session::default();
        session.set_setup(Setup {
            researcher_goal: "liver toxicity".into(),
            store_id: "lab".into(),
            ..Setup::default()
        });
        session.set_setting("keywords", json!("triclosan")).unwrap();
        let q = session.add_query("triclosan liver");
        session.set_selected(&q.id, true).unwrap();
        session
    }

    #[tokio::test]
    async fn save_result_writes_flattened_row() {
        let session = session();
        let store = MemoryStore::default();

        let receipt = session
            .save_result(&store, &article(), "relevant", "triclosan liver", 7)
            .await
            .unwrap();

        assert!(receipt.saved);
        assert_eq!(receipt.version.as_deref(), Some("v1"));
        let records = store.records("lab-saved");
        assert_eq!(records.len(), 1);
        let row = SavedRow::from_record(&records[0]);
        assert_eq!(row.paper_authors, "Doktorova T, Rogiers V");
        assert_eq!(row.paper_year, "2020");
        assert_eq!(row.pubmed_url, "https://pubmed.ncbi.nlm.nih.gov/12345/");
        assert_eq!(row.researcher_goal, "liver toxicity");
        assert_eq!(row.search_query, "triclosan liver");
        assert_eq!(row.results_count, "7");
        assert_eq!(row.search_keywords, "triclosan");
        assert_eq!(row.user_note, "relevant");
        assert_eq!(
            row.snapshot().unwrap().query.map(|q| q.text),
            Some("triclosan liver".to_string())
        );
    }

    #[tokio::test]
    async fn broken_store_reports_unsaved_and_keeps_state() {
        let session = session();
        let before = session.clone();
        let store = MemoryStore::broken();

        let receipt = session
            .save_result(&store, &article(), "", "triclosan liver", 1)
            .await
            .unwrap();

        assert!(!receipt.saved);
        assert!(receipt.version.is_none());
        assert_eq!(receipt.error.as_deref(), Some("store unavailable"));
        assert_eq!(session, before);
    }

    #[tokio::test]
    async fn broken_store_read_is_persistence_failure() {
        let session = session();
        let err = session.list_saved(&MemoryStore::broken()).await.unwrap_err();
        assert!(matches!(err, SessionError::PersistenceFailure { .. }));
    }

    #[tokio::test]
    async fn restore_saved_row_brings_back_its_session() {
        let original = session();
        let store = MemoryStore::default();
        original
            .save_result(&store, &article(), "", "triclosan liver", 1)
            .await
            .unwrap();
        let rows = original.list_saved(&store).await.unwrap();

        let mut other = Session::default();
        other.add_query("unrelated");
        let report = other.restore_saved(&rows[0]).unwrap();

        assert_eq!(report.discarded_queries, 1);
        assert_eq!(other.setup(), original.setup());
        assert_eq!(other.settings(), original.settings());
        assert_eq!(other.queries().len(), 1);
    }

    #[test]
    fn corrupt_blob_leaves_session_unchanged() {
        let mut session = session();
        let before = session.clone();
        let row = SavedRow {
            state_snapshot: "{not json".into(),
            ..SavedRow::default()
        };

        let err = session.restore_saved(&row).unwrap_err();

        assert!(matches!(err, SessionError::Snapshot(_)));
        assert_eq!(session, before);
    }

    #[tokio::test]
    async fn settings_round_trip_through_store() {
        let mut session = session();
        let store = MemoryStore::default();
        session.save_settings(&store).await.unwrap();
        let record = &store.records("lab-settings")[0];
        assert_eq!(record["is_advanced"], "false");
        assert!(record.contains_key("setup"));

        session.set_setting("keywords", json!("parabens")).unwrap();
        let outcome = session.load_settings(&store).await.unwrap();

        assert!(matches!(outcome, LoadOutcome::Restored(_)));
        assert_eq!(
            session.settings().simple().keywords.as_deref(),
            Some("triclosan")
        );
    }

    #[tokio::test]
    async fn load_without_snapshot_is_nothing_to_load() {
        let mut session = Session::default();
        let outcome = session.load_settings(&MemoryStore::default()).await.unwrap();
        assert_eq!(outcome, LoadOutcome::NothingToLoad);
    }

    #[test]
    fn keys_fall_back_to_default_store_id() {
        let session = Session::default();
        assert_eq!(session.saved_key(), "pubmedr-saved");
        assert_eq!(session.settings_key(), "pubmedr-settings");
    }
}
