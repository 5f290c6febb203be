//! Scoring engine: compiled lexicon matching, the weighted signal
//! classifier, the three-tier urgency scorer, and the regex extraction
//! helpers, plus the async batch/worker glue on top.
//!
//! Everything here is deterministic: the same text against the same
//! compiled lexicon always produces the same report, byte for byte.

pub mod batch;
pub mod extract;
pub mod matcher;
pub mod scorer;
pub mod tiers;
pub mod worker;

pub use batch::{classify_batch, BatchError};
pub use extract::{
    detect_stage, detect_timeline, extract, extract_desired_features, extract_pain_points,
};
pub use matcher::{CompiledLexicon, MatchHit, PhraseSet};
pub use scorer::{classify_once, ClassifyOptions, SignalClassifier};
pub use tiers::TierScorer;
pub use worker::{ScoreWorker, WorkerStats};
