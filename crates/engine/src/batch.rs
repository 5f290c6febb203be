//! Bounded-concurrency batch classification
//!
//! The classifier itself is pure and lock-free; this helper is just the
//! fan-out shape callers need when scoring many stored records. Each text
//! runs on the blocking pool, at most `limit` in flight, and results come
//! back in input order. A failed task surfaces as that item's error, never
//! as an aborted batch.

use crate::scorer::SignalClassifier;
use futures::stream::{self, StreamExt};
use signal_radar_core::SignalReport;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("classification task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Classify `texts` with at most `limit` classifications in flight.
/// `limit` is clamped to at least 1. Output order matches input order.
pub async fn classify_batch(
    classifier: Arc<SignalClassifier>,
    texts: Vec<String>,
    limit: usize,
) -> Vec<Result<SignalReport, BatchError>> {
    let limit = limit.max(1);
    stream::iter(texts.into_iter().map(|text| {
        let classifier = Arc::clone(&classifier);
        async move {
            tokio::task::spawn_blocking(move || classifier.classify(&text))
                .await
                .map_err(BatchError::from)
        }
    }))
    .buffered(limit)
    .collect()
    .await
}
