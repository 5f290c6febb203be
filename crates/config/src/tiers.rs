//! Tier rule configuration
//!
//! The hot/warm/cold scorer takes a differently-shaped lexicon: plain
//! phrase lists counted by presence, plus budget regexes whose hits raise
//! the hot count. This module defines the YAML document and the bundled
//! lead-qualification defaults.

use serde::{Deserialize, Serialize};
use signal_radar_core::TierRules;
use std::path::Path;

/// Tier rules loaded from a YAML file or built in code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TiersConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub hot: Vec<String>,
    pub warm: Vec<String>,
    /// Regex sources (not escaped phrases); hits count as hot signals.
    #[serde(default)]
    pub budget_patterns: Vec<String>,
    #[serde(default = "default_hot_min")]
    pub hot_min: u32,
    #[serde(default = "default_warm_hot_min")]
    pub warm_hot_min: u32,
    #[serde(default = "default_warm_min")]
    pub warm_min: u32,
    #[serde(default = "default_min_text_len")]
    pub min_text_len: u32,
    #[serde(default = "default_context_window")]
    pub context_window: u32,
}

fn default_hot_min() -> u32 {
    2
}

fn default_warm_hot_min() -> u32 {
    1
}

fn default_warm_min() -> u32 {
    2
}

fn default_min_text_len() -> u32 {
    10
}

fn default_context_window() -> u32 {
    100
}

impl TiersConfig {
    /// Load from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TiersConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            TiersConfigError::FileNotFound(path.as_ref().display().to_string(), e.to_string())
        })?;

        serde_yaml::from_str(&content).map_err(|e| TiersConfigError::ParseError(e.to_string()))
    }

    pub fn into_rules(self) -> TierRules {
        TierRules {
            hot: self.hot,
            warm: self.warm,
            budget_patterns: self.budget_patterns,
            hot_min: self.hot_min,
            warm_hot_min: self.warm_hot_min,
            warm_min: self.warm_min,
            min_text_len: self.min_text_len,
            context_window: self.context_window,
        }
    }

    /// Default lead-qualification tiers: urgency phrases and explicit money
    /// run hot, exploratory phrases run warm.
    pub fn lead_defaults() -> Self {
        Self {
            name: "lead_tiers".to_string(),
            description: "Hot/warm/cold qualification for inbound lead text".to_string(),
            hot: vec![
                "asap".to_string(),
                "urgent".to_string(),
                "urgently".to_string(),
                "immediately".to_string(),
                "right away".to_string(),
                "need to start".to_string(),
                "ready to buy".to_string(),
                "ready to start".to_string(),
                "hiring now".to_string(),
                "this week".to_string(),
            ],
            warm: vec![
                "looking for".to_string(),
                "recommendations".to_string(),
                "interested in".to_string(),
                "considering".to_string(),
                "shopping around".to_string(),
                "comparing".to_string(),
                "in the market".to_string(),
                "next month".to_string(),
            ],
            budget_patterns: vec![
                // Dollar amounts: $50K, $120,000, $3.5m
                r"\$\s*\d[\d,]*(?:\.\d+)?(?:\s*[kKmM]\b)?".to_string(),
                // Bare figures: "budget of 50k"; dollar forms hit the rule above
                r"(?i)\bbudget (?:of|is|around)\s*\d".to_string(),
            ],
            hot_min: default_hot_min(),
            warm_hot_min: default_warm_hot_min(),
            warm_min: default_warm_min(),
            min_text_len: default_min_text_len(),
            context_window: default_context_window(),
        }
    }
}

#[derive(Debug)]
pub enum TiersConfigError {
    FileNotFound(String, String),
    ParseError(String),
}

impl std::fmt::Display for TiersConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FileNotFound(path, err) => {
                write!(f, "Tier config not found at {}: {}", path, err)
            }
            Self::ParseError(err) => write!(f, "Failed to parse tier config: {}", err),
        }
    }
}

impl std::error::Error for TiersConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_yaml_with_threshold_defaults() {
        let yaml = r#"
name: agency_leads
hot:
  - "start immediately"
  - "signed off"
warm:
  - "exploring"
budget_patterns:
  - '\$\s*\d+'
"#;
        let config: TiersConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.hot.len(), 2);
        assert_eq!(config.hot_min, 2);
        assert_eq!(config.warm_hot_min, 1);
        assert_eq!(config.warm_min, 2);
        assert_eq!(config.min_text_len, 10);
    }

    #[test]
    fn test_into_rules_preserves_lists_and_thresholds() {
        let rules = TiersConfig::lead_defaults().into_rules();
        assert!(rules.hot.contains(&"asap".to_string()));
        assert!(rules.warm.contains(&"looking for".to_string()));
        assert_eq!(rules.budget_patterns.len(), 2);
        assert_eq!(rules.hot_min, 2);
    }

    #[test]
    fn test_load_reports_missing_file() {
        let err = TiersConfig::load("definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, TiersConfigError::FileNotFound(_, _)));
    }
}
