//! Scoring pass over stored records
//!
//! [`ScoreWorker`] wires the classifier and extraction helpers to the
//! [`RecordStore`] / [`AlertSink`] ports: drain a batch of pending records,
//! score each, persist the outcome, and raise an alert for every present
//! signal. Per-record failures are logged and counted, not propagated; only
//! a failure to fetch the pending batch aborts the pass.

use std::sync::Arc;

use chrono::Utc;
use signal_radar_core::{AlertSink, RecordStore, ScoreOutcome, SignalAlert, StoreError};

use crate::extract;
use crate::scorer::SignalClassifier;

const DEFAULT_BATCH_SIZE: usize = 25;

/// Counters for a single [`ScoreWorker::run_once`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerStats {
    /// Records whose outcome was persisted.
    pub processed: usize,
    /// Alerts delivered for present signals.
    pub alerted: usize,
    /// Records that failed to persist plus alerts that failed to deliver.
    pub failed: usize,
}

pub struct ScoreWorker {
    store: Arc<dyn RecordStore>,
    alerts: Arc<dyn AlertSink>,
    classifier: Arc<SignalClassifier>,
    batch_size: usize,
}

impl ScoreWorker {
    pub fn new(
        store: Arc<dyn RecordStore>,
        alerts: Arc<dyn AlertSink>,
        classifier: Arc<SignalClassifier>,
    ) -> Self {
        Self {
            store,
            alerts,
            classifier,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Cap on records drained per pass, clamped to at least 1.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Score one batch of pending records and return the pass counters.
    pub async fn run_once(&self) -> Result<WorkerStats, StoreError> {
        let pending = self.store.pending(self.batch_size).await?;
        let mut stats = WorkerStats::default();

        for record in pending {
            let report = self.classifier.classify(&record.text);
            let extraction = extract::extract(&record.text);
            let has_signal = report.has_signal;
            let outcome = ScoreOutcome {
                record_id: record.id,
                report,
                extraction,
                scored_at: Utc::now(),
            };
            let alert = has_signal.then(|| SignalAlert::from_outcome(&outcome));

            if let Err(error) = self.store.save_outcome(outcome).await {
                tracing::warn!(record_id = %record.id, %error, "failed to persist score outcome");
                stats.failed += 1;
                continue;
            }
            stats.processed += 1;

            if let Some(alert) = alert {
                match self.alerts.deliver(alert).await {
                    Ok(()) => stats.alerted += 1,
                    Err(error) => {
                        tracing::warn!(record_id = %record.id, %error, "alert delivery failed");
                        stats.failed += 1;
                    }
                }
            }
        }

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use signal_radar_config::LexiconConfig;
    use signal_radar_core::{AlertError, InMemoryRecordStore, MemoryAlertSink, ScoredRecord};

    fn classifier() -> Arc<SignalClassifier> {
        Arc::new(SignalClassifier::from_config(LexiconConfig::defection(), None).unwrap())
    }

    fn worker(
        store: Arc<InMemoryRecordStore>,
        sink: Arc<MemoryAlertSink>,
    ) -> ScoreWorker {
        ScoreWorker::new(store, sink, classifier())
    }

    #[tokio::test]
    async fn test_scores_pending_records_and_alerts_on_signals() {
        let store = Arc::new(InMemoryRecordStore::default());
        let sink = Arc::new(MemoryAlertSink::default());

        let hot = ScoredRecord::new(
            "We are switching from CompetitorX, it's been buggy and support is terrible, \
             we need a replacement ASAP",
        );
        let quiet = ScoredRecord::new("Just browsing, not sure what we need yet");
        let hot_id = hot.id;
        store.push(hot);
        store.push(quiet);

        let stats = worker(Arc::clone(&store), Arc::clone(&sink)).run_once().await.unwrap();

        assert_eq!(
            stats,
            WorkerStats {
                processed: 2,
                alerted: 1,
                failed: 0
            }
        );
        assert_eq!(store.pending_count(), 0);
        assert_eq!(store.outcome_count(), 2);

        let outcome = store.outcome(hot_id).unwrap();
        assert!(outcome.report.has_signal);
        assert!(outcome.report.score >= 80);

        let delivered = sink.delivered();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].record_id, hot_id);
        assert_eq!(delivered[0].score, outcome.report.score);
    }

    #[tokio::test]
    async fn test_batch_size_limits_each_pass() {
        let store = Arc::new(InMemoryRecordStore::default());
        let sink = Arc::new(MemoryAlertSink::default());
        for _ in 0..3 {
            store.push(ScoredRecord::new("not renewing, cancelling our contract"));
        }

        let worker = worker(Arc::clone(&store), sink).with_batch_size(2);
        let stats = worker.run_once().await.unwrap();

        assert_eq!(stats.processed, 2);
        assert_eq!(store.pending_count(), 1);

        let stats = worker.run_once().await.unwrap();
        assert_eq!(stats.processed, 1);
        assert_eq!(store.pending_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_store_yields_zero_stats() {
        let store = Arc::new(InMemoryRecordStore::default());
        let sink = Arc::new(MemoryAlertSink::default());

        let stats = worker(store, sink).run_once().await.unwrap();
        assert_eq!(stats, WorkerStats::default());
    }

    struct FailingSink;

    #[async_trait]
    impl AlertSink for FailingSink {
        async fn deliver(&self, _alert: SignalAlert) -> Result<(), AlertError> {
            Err(AlertError::Delivery("sink offline".to_string()))
        }
    }

    #[tokio::test]
    async fn test_alert_failure_counts_but_does_not_abort() {
        let store = Arc::new(InMemoryRecordStore::default());
        store.push(ScoredRecord::new("migrating from LegacyCorp, too expensive"));
        store.push(ScoredRecord::new("cancel my subscription immediately"));

        let worker = ScoreWorker::new(store.clone(), Arc::new(FailingSink), classifier());
        let stats = worker.run_once().await.unwrap();

        assert_eq!(stats.processed, 2);
        assert_eq!(stats.alerted, 0);
        assert_eq!(stats.failed, 2);
        assert_eq!(store.outcome_count(), 2);
    }

    struct FailingStore;

    #[async_trait]
    impl RecordStore for FailingStore {
        async fn pending(&self, _limit: usize) -> Result<Vec<ScoredRecord>, StoreError> {
            Ok(vec![ScoredRecord::new("cancel my subscription immediately")])
        }

        async fn save_outcome(&self, _outcome: ScoreOutcome) -> Result<(), StoreError> {
            Err(StoreError::Backend("write refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_store_failure_skips_record_and_alert() {
        let sink = Arc::new(MemoryAlertSink::default());
        let worker = ScoreWorker::new(Arc::new(FailingStore), sink.clone(), classifier());
        let stats = worker.run_once().await.unwrap();

        assert_eq!(
            stats,
            WorkerStats {
                processed: 0,
                alerted: 0,
                failed: 1
            }
        );
        assert!(sink.delivered().is_empty());
    }
}
