//! Three-tier (hot/warm/cold) scorer
//!
//! Same matching primitive as the weighted classifier, differently shaped
//! rules: presence counts over a hot list and a warm list, no weights.
//! Budget regex hits are added to the hot count before thresholding, so an
//! explicit dollar amount plus one urgency phrase is enough for hot.

use crate::matcher::{char_position, excerpt_snippet, PhraseSet};
use regex::Regex;
use signal_radar_config::TiersConfig;
use signal_radar_core::{Excerpt, Tier, TierReport, TierRules, ValidationError};

/// Tier rules compiled for scoring. Pure and `Send + Sync`.
#[derive(Debug, Clone)]
pub struct TierScorer {
    hot: PhraseSet,
    warm: PhraseSet,
    budget: Vec<Regex>,
    rules: TierRules,
}

impl TierScorer {
    /// Validate and compile. Budget patterns are regex sources supplied by
    /// configuration; an unbuildable one fails construction rather than
    /// silently weakening the hot count.
    pub fn new(rules: &TierRules) -> Result<Self, ValidationError> {
        let hot = PhraseSet::compile(&rules.hot, false)?;
        let warm = PhraseSet::compile(&rules.warm, false)?;
        let budget = rules
            .budget_patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| ValidationError::InvalidPattern {
                    pattern: pattern.clone(),
                    message: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            hot,
            warm,
            budget,
            rules: rules.clone(),
        })
    }

    pub fn from_config(config: TiersConfig) -> Result<Self, ValidationError> {
        Self::new(&config.into_rules())
    }

    /// Score one text. Never fails; short input is the cold baseline.
    pub fn score(&self, text: &str) -> TierReport {
        if (text.chars().count() as u32) < self.rules.min_text_len {
            return TierReport::baseline(format!(
                "text below the {} character minimum",
                self.rules.min_text_len
            ));
        }

        let window = self.rules.context_window;
        let hot_hits = self.hot.scan(text, window);
        let budget_hits: Vec<Excerpt> = self
            .budget
            .iter()
            .filter_map(|regex| {
                regex.find(text).map(|found| Excerpt {
                    phrase: found.as_str().to_string(),
                    snippet: excerpt_snippet(text, found.start(), found.end(), window),
                    position: char_position(text, found.start()),
                })
            })
            .collect();
        let warm_hits = self.warm.scan(text, window);

        let hot_count = (hot_hits.len() + budget_hits.len()) as u32;
        let warm_count = warm_hits.len() as u32;

        let tier = if hot_count >= self.rules.hot_min {
            Tier::Hot
        } else if hot_count >= self.rules.warm_hot_min || warm_count >= self.rules.warm_min {
            Tier::Warm
        } else {
            Tier::Cold
        };

        let reason = format!(
            "{} hot signal(s) including {} budget hit(s), {} warm signal(s)",
            hot_count,
            budget_hits.len(),
            warm_count
        );

        let mut matched_phrases = Vec::with_capacity((hot_count + warm_count) as usize);
        let mut excerpts = Vec::with_capacity((hot_count + warm_count) as usize);
        for excerpt in hot_hits.into_iter().chain(budget_hits).chain(warm_hits) {
            matched_phrases.push(excerpt.phrase.clone());
            excerpts.push(excerpt);
        }

        TierReport {
            tier,
            hot_count,
            warm_count,
            matched_phrases,
            excerpts,
            reason,
        }
    }
}
