//! Lexicon types: the configurable keyword side of the classifier
//!
//! A lexicon is a flat list of phrase/category/weight triples. Callers may
//! supply a custom lexicon per classifier (per-tenant customization); the
//! engine never hardcodes one. Tier rules are the presence-count shaped
//! variant used by the hot/warm/cold scorer.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Signal category a lexicon phrase belongs to.
///
/// The set is closed: scoring bonuses and label derivation reason about
/// category groups, so free-form category strings are not supported.
/// Declaration order defines `Ord`, which keeps category maps and their
/// serialized form stable across runs.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Switching,
    Alternative,
    Replacement,
    Pain,
    Churn,
    Timeline,
    Comparison,
    Urgent,
    Budget,
    Decision,
    Action,
    Interest,
    Research,
    Vague,
    Future,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Switching => "switching",
            Category::Alternative => "alternative",
            Category::Replacement => "replacement",
            Category::Pain => "pain",
            Category::Churn => "churn",
            Category::Timeline => "timeline",
            Category::Comparison => "comparison",
            Category::Urgent => "urgent",
            Category::Budget => "budget",
            Category::Decision => "decision",
            Category::Action => "action",
            Category::Interest => "interest",
            Category::Research => "research",
            Category::Vague => "vague",
            Category::Future => "future",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One keyword entry: a phrase matched case-insensitively (by default)
/// against the input text, with the weight it contributes when present.
/// Weights are strictly positive; zero weights are rejected at compile time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub phrase: String,
    pub category: Category,
    pub weight: u32,
}

impl LexiconEntry {
    pub fn new(phrase: impl Into<String>, category: Category, weight: u32) -> Self {
        Self {
            phrase: phrase.into(),
            category,
            weight,
        }
    }
}

/// A named, ordered list of lexicon entries.
///
/// Order matters: matched phrases are reported in lexicon iteration order.
/// Duplicate phrase+category pairs are tolerated and collapse last-wins when
/// the lexicon is compiled (the first occurrence keeps its position, the
/// later weight applies).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lexicon {
    pub name: String,
    pub entries: Vec<LexiconEntry>,
}

impl Lexicon {
    pub fn new(name: impl Into<String>, entries: Vec<LexiconEntry>) -> Self {
        Self {
            name: name.into(),
            entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Category-combination bonus rule.
///
/// Compound signals are stronger than the sum of their parts, so a rule adds
/// its bonus once when every slot in `requires` is satisfied. A slot is a
/// set of categories of which at least one must be present, which expresses
/// rules like "switching together with timeline-or-urgency". Tables are data
/// carried next to each lexicon, not code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinationRule {
    pub requires: Vec<Vec<Category>>,
    pub bonus: u32,
}

impl CombinationRule {
    pub fn new(requires: Vec<Vec<Category>>, bonus: u32) -> Self {
        Self { requires, bonus }
    }

    /// True when every slot has at least one category present. Rules with no
    /// slots never apply.
    pub fn applies(&self, present: &BTreeSet<Category>) -> bool {
        !self.requires.is_empty()
            && self
                .requires
                .iter()
                .all(|slot| slot.iter().any(|category| present.contains(category)))
    }
}

/// Rules for the three-tier (hot/warm/cold) scorer: presence-count phrase
/// lists instead of weighted entries, plus budget regexes whose hits add to
/// the hot count before thresholding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierRules {
    pub hot: Vec<String>,
    pub warm: Vec<String>,
    pub budget_patterns: Vec<String>,
    /// Hot hits (including budget hits) at or above this make the text hot.
    pub hot_min: u32,
    /// Hot hits at or above this make an otherwise-cold text warm.
    pub warm_hot_min: u32,
    /// Warm hits at or above this make the text warm.
    pub warm_min: u32,
    pub min_text_len: u32,
    pub context_window: u32,
}

impl Default for TierRules {
    fn default() -> Self {
        Self {
            hot: Vec::new(),
            warm: Vec::new(),
            budget_patterns: Vec::new(),
            hot_min: 2,
            warm_hot_min: 1,
            warm_min: 2,
            min_text_len: 10,
            context_window: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serializes_snake_case() {
        let json = serde_json::to_string(&Category::Switching).unwrap();
        assert_eq!(json, "\"switching\"");
        let back: Category = serde_json::from_str("\"urgent\"").unwrap();
        assert_eq!(back, Category::Urgent);
    }

    #[test]
    fn test_combination_rule_requires_every_slot() {
        let rule = CombinationRule::new(
            vec![
                vec![Category::Switching],
                vec![Category::Timeline, Category::Urgent],
            ],
            10,
        );

        let mut present = BTreeSet::new();
        present.insert(Category::Switching);
        assert!(!rule.applies(&present));

        present.insert(Category::Urgent);
        assert!(rule.applies(&present));

        present.remove(&Category::Urgent);
        present.insert(Category::Timeline);
        assert!(rule.applies(&present));
    }

    #[test]
    fn test_empty_combination_rule_never_applies() {
        let rule = CombinationRule::new(Vec::new(), 50);
        let mut present = BTreeSet::new();
        present.insert(Category::Pain);
        assert!(!rule.applies(&present));
    }

    #[test]
    fn test_tier_rule_defaults_match_documented_thresholds() {
        let rules = TierRules::default();
        assert_eq!(rules.hot_min, 2);
        assert_eq!(rules.warm_hot_min, 1);
        assert_eq!(rules.warm_min, 2);
    }
}
