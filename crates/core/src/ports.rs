//! Collaborator ports
//!
//! Persistence and notification are the caller's responsibility; the engine
//! only needs these two seams. `ScoredRecord`/`ScoreOutcome`/`SignalAlert`
//! carry the envelope fields (ids, timestamps) that are deliberately kept
//! out of the classification reports themselves, so report equality stays
//! deterministic.
//!
//! In-memory implementations ship for tests and for embedding callers that
//! do not need a real backend.

use crate::extraction::ExtractionResult;
use crate::signal::SignalReport;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

/// A piece of text waiting to be scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecord {
    pub id: Uuid,
    pub text: String,
    /// Where the text came from (review site, social post, form), free-form.
    pub source: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ScoredRecord {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            source: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Classification plus extraction for one record, as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreOutcome {
    pub record_id: Uuid,
    pub report: SignalReport,
    pub extraction: ExtractionResult,
    pub scored_at: DateTime<Utc>,
}

/// Notification payload derived from a signal-present outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalAlert {
    pub record_id: Uuid,
    pub score: u32,
    pub label: crate::signal::SignalLabel,
    pub headline: String,
    pub body: String,
}

impl SignalAlert {
    pub fn from_outcome(outcome: &ScoreOutcome) -> Self {
        let report = &outcome.report;
        let headline = format!(
            "{} signal (score {}): {} phrase(s) matched",
            report.label,
            report.score,
            report.matched_phrases.len()
        );
        let mut body = report.reason.clone();
        if !report.matched_phrases.is_empty() {
            body.push_str("; matched: ");
            body.push_str(&report.matched_phrases.join(", "));
        }
        if let Some(timeline) = outcome.extraction.timeline {
            body.push_str("; timeline: ");
            body.push_str(timeline.as_str());
        }
        Self {
            record_id: outcome.record_id,
            score: report.score,
            label: report.label,
            headline,
            body,
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store backend unavailable: {0}")]
    Unavailable(String),

    #[error("record {0} not found")]
    NotFound(Uuid),

    #[error("store backend error: {0}")]
    Backend(String),
}

#[derive(Debug, Error)]
pub enum AlertError {
    #[error("alert delivery failed: {0}")]
    Delivery(String),
}

/// Persistence seam: unscored records in, outcomes out. Write ordering and
/// retries live behind this trait, not in the engine.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Up to `limit` records that have no outcome yet.
    async fn pending(&self, limit: usize) -> Result<Vec<ScoredRecord>, StoreError>;

    /// Persist an outcome; the record stops being pending.
    async fn save_outcome(&self, outcome: ScoreOutcome) -> Result<(), StoreError>;
}

/// Notification seam for alerts derived from classification output.
#[async_trait]
pub trait AlertSink: Send + Sync {
    async fn deliver(&self, alert: SignalAlert) -> Result<(), AlertError>;
}

#[derive(Default)]
struct MemoryState {
    pending: Vec<ScoredRecord>,
    outcomes: HashMap<Uuid, ScoreOutcome>,
}

/// Map-backed store for tests and embedded use.
#[derive(Default)]
pub struct InMemoryRecordStore {
    state: RwLock<MemoryState>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, record: ScoredRecord) {
        self.state.write().pending.push(record);
    }

    pub fn outcome(&self, record_id: Uuid) -> Option<ScoreOutcome> {
        self.state.read().outcomes.get(&record_id).cloned()
    }

    pub fn outcome_count(&self) -> usize {
        self.state.read().outcomes.len()
    }

    pub fn pending_count(&self) -> usize {
        self.state.read().pending.len()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn pending(&self, limit: usize) -> Result<Vec<ScoredRecord>, StoreError> {
        let state = self.state.read();
        Ok(state.pending.iter().take(limit).cloned().collect())
    }

    async fn save_outcome(&self, outcome: ScoreOutcome) -> Result<(), StoreError> {
        let mut state = self.state.write();
        state.pending.retain(|record| record.id != outcome.record_id);
        state.outcomes.insert(outcome.record_id, outcome);
        Ok(())
    }
}

/// Collecting sink for tests and embedded use.
#[derive(Default)]
pub struct MemoryAlertSink {
    delivered: RwLock<Vec<SignalAlert>>,
}

impl MemoryAlertSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delivered(&self) -> Vec<SignalAlert> {
        self.delivered.read().clone()
    }
}

#[async_trait]
impl AlertSink for MemoryAlertSink {
    async fn deliver(&self, alert: SignalAlert) -> Result<(), AlertError> {
        self.delivered.write().push(alert);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::SignalLabel;
    use std::collections::BTreeMap;

    fn outcome_with_signal() -> ScoreOutcome {
        let mut counts = BTreeMap::new();
        counts.insert(crate::lexicon::Category::Pain, 1);
        ScoreOutcome {
            record_id: Uuid::new_v4(),
            report: SignalReport {
                has_signal: true,
                score: 72,
                label: SignalLabel::Negative,
                matched_phrases: vec!["buggy".to_string()],
                category_counts: counts,
                excerpts: Vec::new(),
                reason: "matched 1 phrase in 1 category with total weight 6; score 72".to_string(),
            },
            extraction: ExtractionResult {
                timeline: Some(crate::extraction::Timeline::Asap),
                ..ExtractionResult::default()
            },
            scored_at: Utc::now(),
        }
    }

    #[test]
    fn test_alert_carries_score_label_and_evidence() {
        let outcome = outcome_with_signal();
        let alert = SignalAlert::from_outcome(&outcome);
        assert_eq!(alert.record_id, outcome.record_id);
        assert_eq!(alert.score, 72);
        assert!(alert.headline.contains("negative"));
        assert!(alert.headline.contains("72"));
        assert!(alert.body.contains("buggy"));
        assert!(alert.body.contains("ASAP"));
    }

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = InMemoryRecordStore::new();
        let record = ScoredRecord::new("We are switching from X, it has been terrible");
        let id = record.id;
        store.push(record);

        let pending = store.pending(10).await.unwrap();
        assert_eq!(pending.len(), 1);

        let mut outcome = outcome_with_signal();
        outcome.record_id = id;
        store.save_outcome(outcome).await.unwrap();

        assert_eq!(store.pending_count(), 0);
        assert_eq!(store.outcome_count(), 1);
        assert!(store.outcome(id).is_some());
    }

    #[tokio::test]
    async fn test_pending_respects_limit() {
        let store = InMemoryRecordStore::new();
        for i in 0..5 {
            store.push(ScoredRecord::new(format!("record number {i}")));
        }
        assert_eq!(store.pending(3).await.unwrap().len(), 3);
        assert_eq!(store.pending(0).await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_memory_sink_collects_alerts() {
        let sink = MemoryAlertSink::new();
        let alert = SignalAlert::from_outcome(&outcome_with_signal());
        sink.deliver(alert.clone()).await.unwrap();
        assert_eq!(sink.delivered(), vec![alert]);
    }
}
