//! Lexicon configuration
//!
//! Defines the YAML document for a weighted lexicon: entries with an
//! `active` flag for soft-disable, the per-lexicon category-combination
//! bonus table, and suggested thresholds. Two lexicons ship as code-level
//! defaults (competitor defection and buying intent); both are plain
//! configurations of the same engine, with separate combination tables.

use serde::{Deserialize, Serialize};
use signal_radar_core::{Category, CombinationRule, Lexicon, LexiconEntry};
use std::path::Path;

/// Lexicon configuration loaded from a YAML file or built in code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexiconConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Suggested classification thresholds for this lexicon.
    #[serde(default)]
    pub thresholds: ThresholdsConfig,
    pub entries: Vec<LexiconEntryConfig>,
    /// Category-combination bonuses, per lexicon. The defection and
    /// buying-intent tables intentionally stay separate.
    #[serde(default)]
    pub combinations: Vec<CombinationRuleConfig>,
}

/// One configured phrase. `active: false` keeps the entry in the document
/// but out of the compiled lexicon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexiconEntryConfig {
    pub phrase: String,
    pub category: Category,
    pub weight: u32,
    #[serde(default = "default_active")]
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinationRuleConfig {
    /// Slots of categories; every slot must be satisfied by at least one
    /// present category for the bonus to apply.
    pub requires: Vec<Vec<Category>>,
    pub bonus: u32,
}

/// Threshold block shared by lexicon documents.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ThresholdsConfig {
    #[serde(default = "default_min_matches")]
    pub min_matches: u32,
    #[serde(default = "default_min_score")]
    pub min_score: u32,
    #[serde(default = "default_min_text_len")]
    pub min_text_len: u32,
    #[serde(default = "default_context_window")]
    pub context_window: u32,
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            min_matches: default_min_matches(),
            min_score: default_min_score(),
            min_text_len: default_min_text_len(),
            context_window: default_context_window(),
        }
    }
}

fn default_active() -> bool {
    true
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

impl LexiconConfig {
    /// Load from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LexiconConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            LexiconConfigError::FileNotFound(path.as_ref().display().to_string(), e.to_string())
        })?;

        serde_yaml::from_str(&content).map_err(|e| LexiconConfigError::ParseError(e.to_string()))
    }

    /// Convert into the engine-facing lexicon and combination table,
    /// dropping inactive entries.
    pub fn into_lexicon(self) -> (Lexicon, Vec<CombinationRule>) {
        let mut entries = Vec::with_capacity(self.entries.len());
        for entry in self.entries {
            if !entry.active {
                tracing::debug!(phrase = %entry.phrase, "skipping inactive lexicon entry");
                continue;
            }
            entries.push(LexiconEntry::new(entry.phrase, entry.category, entry.weight));
        }
        let combinations = self
            .combinations
            .into_iter()
            .map(|rule| CombinationRule::new(rule.requires, rule.bonus))
            .collect();
        (Lexicon::new(self.name, entries), combinations)
    }

    /// Competitor-defection lexicon: switching, churn, and pain language
    /// around leaving a current vendor. Deliberately omits generic
    /// buying-intent phrases ("looking for", "need a") so neutral browsing
    /// text stays matchless.
    pub fn defection() -> Self {
        let entries = vec![
            entry("switching from", Category::Switching, 10),
            entry("switch from", Category::Switching, 9),
            entry("moving away from", Category::Switching, 9),
            entry("migrating from", Category::Switching, 9),
            entry("moving off", Category::Switching, 8),
            entry("done with", Category::Switching, 7),
            entry("leaving", Category::Switching, 6),
            entry("dropping", Category::Switching, 6),
            entry("cancel my subscription", Category::Churn, 10),
            entry("not renewing", Category::Churn, 9),
            entry("cancelling", Category::Churn, 8),
            entry("canceling", Category::Churn, 8),
            entry("ended our contract", Category::Churn, 8),
            entry("churned", Category::Churn, 7),
            entry("alternative to", Category::Alternative, 9),
            entry("alternatives to", Category::Alternative, 9),
            entry("better option", Category::Alternative, 6),
            entry("other options", Category::Alternative, 5),
            entry("replacement", Category::Replacement, 8),
            entry("replace", Category::Replacement, 7),
            entry("replacing", Category::Replacement, 7),
            entry("too expensive", Category::Pain, 7),
            entry("keeps crashing", Category::Pain, 7),
            entry("buggy", Category::Pain, 6),
            entry("terrible", Category::Pain, 6),
            entry("awful", Category::Pain, 6),
            entry("frustrating", Category::Pain, 6),
            entry("frustrated", Category::Pain, 6),
            entry("unreliable", Category::Pain, 6),
            entry("overpriced", Category::Pain, 6),
            entry("downtime", Category::Pain, 5),
            entry("compared to", Category::Comparison, 5),
            entry("vs", Category::Comparison, 4),
            entry("versus", Category::Comparison, 4),
            entry("this week", Category::Timeline, 7),
            entry("this month", Category::Timeline, 6),
            entry("by end of", Category::Timeline, 6),
            entry("deadline", Category::Timeline, 6),
            entry("asap", Category::Urgent, 8),
            entry("immediately", Category::Urgent, 8),
            entry("urgent", Category::Urgent, 8),
            entry("urgently", Category::Urgent, 8),
            entry("right away", Category::Urgent, 7),
        ];
        let combinations = vec![
            CombinationRuleConfig {
                requires: vec![vec![Category::Switching], vec![Category::Pain]],
                bonus: 10,
            },
            CombinationRuleConfig {
                requires: vec![vec![Category::Churn], vec![Category::Alternative]],
                bonus: 15,
            },
            CombinationRuleConfig {
                requires: vec![
                    vec![Category::Switching],
                    vec![Category::Timeline, Category::Urgent],
                ],
                bonus: 10,
            },
        ];
        Self {
            name: "defection".to_string(),
            description: "Competitor defection signals: leaving, churning, or replacing a vendor"
                .to_string(),
            thresholds: ThresholdsConfig::default(),
            entries,
            combinations,
        }
    }

    /// Buying-intent lexicon: in-market language from prospects who have no
    /// vendor yet.
    pub fn buying_intent() -> Self {
        let entries = vec![
            entry("in the market for", Category::Interest, 9),
            entry("want to buy", Category::Interest, 9),
            entry("shopping for", Category::Interest, 8),
            entry("looking for", Category::Interest, 7),
            entry("interested in", Category::Interest, 6),
            entry("need a", Category::Interest, 6),
            entry("need an", Category::Interest, 6),
            entry("any recommendations", Category::Research, 7),
            entry("recommendations for", Category::Research, 7),
            entry("suggestions for", Category::Research, 6),
            entry("what do you use", Category::Research, 6),
            entry("anyone know", Category::Research, 5),
            entry("how do you handle", Category::Research, 5),
            entry("which is better", Category::Comparison, 7),
            entry("pros and cons", Category::Comparison, 6),
            entry("compared to", Category::Comparison, 5),
            entry("vs", Category::Comparison, 4),
            entry("versus", Category::Comparison, 4),
            entry("budget", Category::Budget, 6),
            entry("quote", Category::Budget, 6),
            entry("pricing", Category::Budget, 5),
            entry("how much", Category::Budget, 5),
            entry("cost", Category::Budget, 4),
            entry("signing up", Category::Decision, 8),
            entry("decided to", Category::Decision, 7),
            entry("going with", Category::Decision, 7),
            entry("ready to", Category::Decision, 6),
            entry("free trial", Category::Action, 7),
            entry("sign up", Category::Action, 7),
            entry("demo", Category::Action, 6),
            entry("get started", Category::Action, 6),
            entry("this week", Category::Timeline, 7),
            entry("this quarter", Category::Timeline, 6),
            entry("this month", Category::Timeline, 6),
            entry("next month", Category::Timeline, 5),
            entry("asap", Category::Urgent, 8),
            entry("urgently", Category::Urgent, 8),
            entry("immediately", Category::Urgent, 8),
            entry("someday", Category::Vague, 2),
            entry("maybe", Category::Vague, 2),
            entry("eventually", Category::Vague, 2),
            entry("next year", Category::Future, 3),
            entry("down the road", Category::Future, 3),
            entry("in the future", Category::Future, 2),
        ];
        let combinations = vec![
            CombinationRuleConfig {
                requires: vec![
                    vec![Category::Interest, Category::Research],
                    vec![Category::Budget],
                ],
                bonus: 10,
            },
            CombinationRuleConfig {
                requires: vec![
                    vec![Category::Decision, Category::Action],
                    vec![Category::Timeline, Category::Urgent],
                ],
                bonus: 15,
            },
            CombinationRuleConfig {
                requires: vec![vec![Category::Interest], vec![Category::Comparison]],
                bonus: 5,
            },
        ];
        Self {
            name: "buying_intent".to_string(),
            description: "Buying-intent signals: in-market prospects researching a purchase"
                .to_string(),
            thresholds: ThresholdsConfig::default(),
            entries,
            combinations,
        }
    }
}

fn entry(phrase: &str, category: Category, weight: u32) -> LexiconEntryConfig {
    LexiconEntryConfig {
        phrase: phrase.to_string(),
        category,
        weight,
        active: true,
    }
}

#[derive(Debug)]
pub enum LexiconConfigError {
    FileNotFound(String, String),
    ParseError(String),
}

impl std::fmt::Display for LexiconConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FileNotFound(path, err) => {
                write!(f, "Lexicon config not found at {}: {}", path, err)
            }
            Self::ParseError(err) => write!(f, "Failed to parse lexicon config: {}", err),
        }
    }
}

impl std::error::Error for LexiconConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_yaml_document() {
        let yaml = r#"
name: tenant_custom
description: Per-tenant overrides
thresholds:
  min_score: 40
entries:
  - phrase: "jumping ship"
    category: switching
    weight: 9
  - phrase: "legacy vendor"
    category: pain
    weight: 4
    active: false
combinations:
  - requires: [[switching], [pain]]
    bonus: 12
"#;
        let config: LexiconConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.name, "tenant_custom");
        assert_eq!(config.thresholds.min_score, 40);
        // Unset threshold fields fall back to their defaults.
        assert_eq!(config.thresholds.min_matches, 1);
        assert_eq!(config.thresholds.context_window, 100);
        assert_eq!(config.entries.len(), 2);
        assert!(config.entries[0].active);
        assert!(!config.entries[1].active);
        assert_eq!(config.combinations[0].bonus, 12);
    }

    #[test]
    fn test_into_lexicon_drops_inactive_entries() {
        let yaml = r#"
name: soft_disable
entries:
  - phrase: "switching from"
    category: switching
    weight: 10
  - phrase: "terrible"
    category: pain
    weight: 6
    active: false
"#;
        let config: LexiconConfig = serde_yaml::from_str(yaml).unwrap();
        let (lexicon, _) = config.into_lexicon();
        assert_eq!(lexicon.len(), 1);
        assert_eq!(lexicon.entries[0].phrase, "switching from");
    }

    #[test]
    fn test_bundled_lexicons_are_well_formed() {
        for config in [LexiconConfig::defection(), LexiconConfig::buying_intent()] {
            assert!(!config.entries.is_empty());
            assert!(config.entries.iter().all(|e| e.weight >= 1));
            assert!(config.entries.iter().all(|e| !e.phrase.trim().is_empty()));
            assert!(!config.combinations.is_empty());
        }
    }

    #[test]
    fn test_bundled_tables_stay_separate() {
        let defection = LexiconConfig::defection();
        let buying = LexiconConfig::buying_intent();
        assert_ne!(
            serde_yaml::to_string(&defection.combinations).unwrap(),
            serde_yaml::to_string(&buying.combinations).unwrap()
        );
    }

    #[test]
    fn test_load_reports_missing_file() {
        let err = LexiconConfig::load("definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, LexiconConfigError::FileNotFound(_, _)));
        assert!(err.to_string().contains("definitely/not/here.yaml"));
    }
}
