//! Weighted lexicon classifier
//!
//! The scoring ladder, applied to the first-occurrence matches from the
//! compiled lexicon:
//! 1. base = min(50, total weight x 5)
//! 2. +15 at 3+ distinct phrases, a further +10 at 5+
//! 3. +10 at 2+ distinct categories, a further +10 at 3+
//! 4. per-lexicon category-combination bonuses (configured data, one
//!    application per rule)
//! 5. clamp to 0..=100
//!
//! A signal is present iff distinct matches >= min_matches AND score >=
//! min_score, both inclusive. The qualitative label is a second output
//! derived from the matched category groups, independent of the score.

use crate::matcher::CompiledLexicon;
use serde::{Deserialize, Serialize};
use signal_radar_config::{LexiconConfig, ThresholdsConfig};
use signal_radar_core::{
    Category, CombinationRule, Lexicon, SignalLabel, SignalReport, ValidationError,
};
use std::collections::{BTreeMap, BTreeSet};

/// Classification options. All fields have serde defaults so partial
/// documents work; `normalized` applies the defensive clamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifyOptions {
    #[serde(default)]
    pub case_sensitive: bool,
    #[serde(default = "default_min_matches")]
    pub min_matches: u32,
    #[serde(default = "default_min_score")]
    pub min_score: u32,
    #[serde(default = "default_min_text_len")]
    pub min_text_len: u32,
    #[serde(default = "default_context_window")]
    pub context_window: u32,
}

fn default_min_matches() -> u32 {
    1
}

fn default_min_score() -> u32 {
    30
}

fn default_min_text_len() -> u32 {
    10
}

fn default_context_window() -> u32 {
    100
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            min_matches: default_min_matches(),
            min_score: default_min_score(),
            min_text_len: default_min_text_len(),
            context_window: default_context_window(),
        }
    }
}

impl ClassifyOptions {
    /// Clamp to usable values: a presence decision needs at least one match
    /// (so `min_matches: 0` cannot declare a signal on a matchless text),
    /// and `min_score` above the clamp ceiling would be unsatisfiable.
    pub fn normalized(self) -> Self {
        Self {
            min_matches: self.min_matches.max(1),
            min_score: self.min_score.min(100),
            ..self
        }
    }
}

impl From<&ThresholdsConfig> for ClassifyOptions {
    fn from(thresholds: &ThresholdsConfig) -> Self {
        Self {
            case_sensitive: false,
            min_matches: thresholds.min_matches,
            min_score: thresholds.min_score,
            min_text_len: thresholds.min_text_len,
            context_window: thresholds.context_window,
        }
    }
}

/// A lexicon compiled with its combination table and options, ready to
/// classify any number of texts. Pure and `Send + Sync`; one instance can
/// serve concurrent callers without locks.
#[derive(Debug, Clone)]
pub struct SignalClassifier {
    lexicon: CompiledLexicon,
    combinations: Vec<CombinationRule>,
    options: ClassifyOptions,
}

impl SignalClassifier {
    /// Validate and compile. The only failable step: malformed entries
    /// surface here, before any text is seen.
    pub fn new(
        lexicon: &Lexicon,
        combinations: &[CombinationRule],
        options: ClassifyOptions,
    ) -> Result<Self, ValidationError> {
        let options = options.normalized();
        Ok(Self {
            lexicon: CompiledLexicon::compile(lexicon, options.case_sensitive)?,
            combinations: combinations.to_vec(),
            options,
        })
    }

    /// Build from a lexicon document, using its suggested thresholds unless
    /// the caller overrides them.
    pub fn from_config(
        config: LexiconConfig,
        options: Option<ClassifyOptions>,
    ) -> Result<Self, ValidationError> {
        let options = options.unwrap_or_else(|| ClassifyOptions::from(&config.thresholds));
        let (lexicon, combinations) = config.into_lexicon();
        Self::new(&lexicon, &combinations, options)
    }

    pub fn options(&self) -> &ClassifyOptions {
        &self.options
    }

    pub fn lexicon_name(&self) -> &str {
        self.lexicon.name()
    }

    /// Classify one text. Never fails: empty, matchless, or too-short input
    /// yields the deterministic baseline report.
    pub fn classify(&self, text: &str) -> SignalReport {
        if (text.chars().count() as u32) < self.options.min_text_len {
            return SignalReport::baseline(format!(
                "text below the {} character minimum",
                self.options.min_text_len
            ));
        }

        let hits = self.lexicon.scan(text, self.options.context_window);
        if hits.is_empty() {
            return SignalReport::baseline("no lexicon phrases matched");
        }

        let mut matched_phrases = Vec::with_capacity(hits.len());
        let mut excerpts = Vec::with_capacity(hits.len());
        let mut category_counts: BTreeMap<Category, u32> = BTreeMap::new();
        let mut total_weight: u64 = 0;

        for hit in hits {
            total_weight += u64::from(hit.matched.weight);
            *category_counts.entry(hit.matched.category).or_insert(0) += 1;
            matched_phrases.push(hit.matched.phrase);
            excerpts.push(hit.excerpt);
        }

        let distinct = matched_phrases.len() as u32;
        let categories = category_counts.len() as u32;

        let mut score = total_weight.saturating_mul(5).min(50) as u32;
        if distinct >= 3 {
            score += 15;
            if distinct >= 5 {
                score += 10;
            }
        }
        if categories >= 2 {
            score += 10;
            if categories >= 3 {
                score += 10;
            }
        }

        let present: BTreeSet<Category> = category_counts.keys().copied().collect();
        for rule in &self.combinations {
            if rule.applies(&present) {
                score = score.saturating_add(rule.bonus);
            }
        }
        let score = score.min(100);

        let has_signal = distinct >= self.options.min_matches && score >= self.options.min_score;
        let label = SignalLabel::from_categories(&present);
        let reason = format!(
            "matched {} phrase{} in {} categor{} with total weight {}; score {}",
            distinct,
            if distinct == 1 { "" } else { "s" },
            categories,
            if categories == 1 { "y" } else { "ies" },
            total_weight,
            score
        );

        SignalReport {
            has_signal,
            score,
            label,
            matched_phrases,
            category_counts,
            excerpts,
            reason,
        }
    }
}

/// One-shot convenience: compile and classify in a single call.
pub fn classify_once(
    text: &str,
    lexicon: &Lexicon,
    combinations: &[CombinationRule],
    options: ClassifyOptions,
) -> Result<SignalReport, ValidationError> {
    SignalClassifier::new(lexicon, combinations, options)
        .map(|classifier| classifier.classify(text))
}
