//! Configuration surface for the signal scoring engine
//!
//! Lexicons and tier rules are swappable data, never compiled-in behavior:
//! - lexicon.yaml - weighted phrase entries, combination bonus tables,
//!   suggested thresholds, `active` soft-disable flags
//! - tiers.yaml - hot/warm phrase lists, budget regexes, tier thresholds
//!
//! Both documents load with `serde_yaml` and convert into the plain core
//! types the engine consumes. Bundled defaults (`LexiconConfig::defection`,
//! `LexiconConfig::buying_intent`, `TiersConfig::lead_defaults`) mirror the
//! same schema so a caller can start without any files on disk.

pub mod lexicon;
pub mod tiers;

pub use lexicon::{
    CombinationRuleConfig, LexiconConfig, LexiconConfigError, LexiconEntryConfig, ThresholdsConfig,
};
pub use tiers::{TiersConfig, TiersConfigError};
