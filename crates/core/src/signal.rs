//! Classification output types
//!
//! Reports are plain serde-serializable structs with no framework wrapper,
//! so callers can embed them in JSON responses, database rows, or alert
//! payloads unchanged. Every report is produced fresh per call; the engine
//! holds no state between invocations.

use crate::lexicon::Category;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One lexicon hit. `position` is the character offset (not byte offset) of
/// the first occurrence of the phrase in the source text; the phrase counts
/// once no matter how often it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseMatch {
    pub phrase: String,
    pub category: Category,
    pub weight: u32,
    pub position: usize,
}

/// Evidence snippet for a match: the phrase plus the surrounding context
/// window, cut on grapheme boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Excerpt {
    pub phrase: String,
    pub snippet: String,
    pub position: usize,
}

/// Qualitative label derived from which category groups are present in the
/// matches. Independent of the numeric score: a low-scoring text can still
/// read as `negative`, and a high score does not force `mixed_defection`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalLabel {
    /// Pain or churn together with alternative-seeking language.
    MixedDefection,
    /// Alternative, replacement, comparison, or switching language.
    SeekingAlternative,
    /// Pain or churn language only.
    Negative,
    /// Buying-intent language (interest, decision, action, budget, timing).
    InMarket,
    Neutral,
}

impl SignalLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalLabel::MixedDefection => "mixed_defection",
            SignalLabel::SeekingAlternative => "seeking_alternative",
            SignalLabel::Negative => "negative",
            SignalLabel::InMarket => "in_market",
            SignalLabel::Neutral => "neutral",
        }
    }

    /// Derive the label from the set of matched categories.
    pub fn from_categories(present: &BTreeSet<Category>) -> Self {
        let negative = present.contains(&Category::Pain) || present.contains(&Category::Churn);
        let seeking = present.contains(&Category::Alternative)
            || present.contains(&Category::Replacement)
            || present.contains(&Category::Comparison)
            || present.contains(&Category::Switching);
        let in_market = present.contains(&Category::Interest)
            || present.contains(&Category::Decision)
            || present.contains(&Category::Action)
            || present.contains(&Category::Budget)
            || present.contains(&Category::Timeline)
            || present.contains(&Category::Urgent);

        if negative && seeking {
            SignalLabel::MixedDefection
        } else if seeking {
            SignalLabel::SeekingAlternative
        } else if negative {
            SignalLabel::Negative
        } else if in_market {
            SignalLabel::InMarket
        } else {
            SignalLabel::Neutral
        }
    }
}

impl Default for SignalLabel {
    fn default() -> Self {
        Self::Neutral
    }
}

impl std::fmt::Display for SignalLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a weighted classification run.
///
/// `matched_phrases` and `excerpts` are in lexicon iteration order (not text
/// position order), and `category_counts` is consistent with them: every
/// matched phrase maps to exactly one counted category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalReport {
    pub has_signal: bool,
    /// Calibrated score, always clamped to 0..=100.
    pub score: u32,
    pub label: SignalLabel,
    pub matched_phrases: Vec<String>,
    pub category_counts: BTreeMap<Category, u32>,
    pub excerpts: Vec<Excerpt>,
    pub reason: String,
}

impl SignalReport {
    /// The deterministic no-signal result used for empty, too-short, or
    /// matchless input. Never an error.
    pub fn baseline(reason: impl Into<String>) -> Self {
        Self {
            has_signal: false,
            score: 0,
            label: SignalLabel::Neutral,
            matched_phrases: Vec::new(),
            category_counts: BTreeMap::new(),
            excerpts: Vec::new(),
            reason: reason.into(),
        }
    }
}

/// Lead temperature produced by the three-tier scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Hot,
    Warm,
    Cold,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Hot => "hot",
            Tier::Warm => "warm",
            Tier::Cold => "cold",
        }
    }
}

impl Default for Tier {
    fn default() -> Self {
        Self::Cold
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a three-tier scoring run. Budget-pattern hits are folded into
/// `hot_count` before thresholding, mirroring how the counts were compared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierReport {
    pub tier: Tier,
    pub hot_count: u32,
    pub warm_count: u32,
    pub matched_phrases: Vec<String>,
    pub excerpts: Vec<Excerpt>,
    pub reason: String,
}

impl TierReport {
    /// Cold baseline for empty or too-short input.
    pub fn baseline(reason: impl Into<String>) -> Self {
        Self {
            tier: Tier::Cold,
            hot_count: 0,
            warm_count: 0,
            matched_phrases: Vec::new(),
            excerpts: Vec::new(),
            reason: reason.into(),
        }
    }
}
