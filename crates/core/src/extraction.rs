//! Structured extraction output types
//!
//! Extraction is a separate concern from scoring: pain points, desired
//! features, timeline, and funnel stage are derived independently from the
//! same source text, and a caller who only wants a category never pays for
//! them.

use serde::{Deserialize, Serialize};

/// Fixed timeline vocabulary. Serialized as the exact human-readable labels
/// downstream consumers store and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeline {
    #[serde(rename = "ASAP")]
    Asap,
    #[serde(rename = "This week")]
    ThisWeek,
    #[serde(rename = "This month")]
    ThisMonth,
    #[serde(rename = "Next month")]
    NextMonth,
    #[serde(rename = "This quarter")]
    ThisQuarter,
    #[serde(rename = "Next quarter")]
    NextQuarter,
    #[serde(rename = "This year")]
    ThisYear,
    #[serde(rename = "6 months")]
    SixMonths,
    #[serde(rename = "1 year")]
    OneYear,
}

impl Timeline {
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeline::Asap => "ASAP",
            Timeline::ThisWeek => "This week",
            Timeline::ThisMonth => "This month",
            Timeline::NextMonth => "Next month",
            Timeline::ThisQuarter => "This quarter",
            Timeline::NextQuarter => "Next quarter",
            Timeline::ThisYear => "This year",
            Timeline::SixMonths => "6 months",
            Timeline::OneYear => "1 year",
        }
    }
}

impl std::fmt::Display for Timeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Funnel stage, detected in a fixed priority order: the most committed
/// stage wins when several are mentioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Researching,
    Evaluating,
    Decided,
    Implemented,
    Unknown,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Researching => "researching",
            Stage::Evaluating => "evaluating",
            Stage::Decided => "decided",
            Stage::Implemented => "implemented",
            Stage::Unknown => "unknown",
        }
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::Unknown
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the extraction helpers pull from a text. Pain points and
/// desired features are deduplicated and capped at five each, first-seen
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub pain_points: Vec<String>,
    pub desired_features: Vec<String>,
    pub timeline: Option<Timeline>,
    pub stage: Stage,
}

impl Default for ExtractionResult {
    fn default() -> Self {
        Self {
            pain_points: Vec::new(),
            desired_features: Vec::new(),
            timeline: None,
            stage: Stage::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeline_serializes_to_display_labels() {
        assert_eq!(serde_json::to_string(&Timeline::Asap).unwrap(), "\"ASAP\"");
        assert_eq!(
            serde_json::to_string(&Timeline::SixMonths).unwrap(),
            "\"6 months\""
        );
        let back: Timeline = serde_json::from_str("\"Next quarter\"").unwrap();
        assert_eq!(back, Timeline::NextQuarter);
    }

    #[test]
    fn test_stage_defaults_to_unknown() {
        assert_eq!(Stage::default(), Stage::Unknown);
        assert_eq!(
            serde_json::to_string(&Stage::Researching).unwrap(),
            "\"researching\""
        );
    }

    #[test]
    fn test_extraction_default_is_empty() {
        let result = ExtractionResult::default();
        assert!(result.pain_points.is_empty());
        assert!(result.desired_features.is_empty());
        assert_eq!(result.timeline, None);
        assert_eq!(result.stage, Stage::Unknown);
    }
}
