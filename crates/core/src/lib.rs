//! Core types and ports for the signal scoring engine
//!
//! This crate provides the foundational pieces shared by the config and
//! engine crates:
//! - Lexicon types (categories, weighted entries, combination rules, tier rules)
//! - Classification and extraction result types
//! - Validation errors
//! - Persistence and notification ports, with in-memory implementations

pub mod error;
pub mod extraction;
pub mod lexicon;
pub mod ports;
pub mod signal;

pub use error::ValidationError;
pub use extraction::{ExtractionResult, Stage, Timeline};
pub use lexicon::{Category, CombinationRule, Lexicon, LexiconEntry, TierRules};
pub use signal::{Excerpt, PhraseMatch, SignalLabel, SignalReport, Tier, TierReport};

pub use ports::{
    AlertError, AlertSink, InMemoryRecordStore, MemoryAlertSink, RecordStore, ScoreOutcome,
    ScoredRecord, SignalAlert, StoreError,
};
