//! Structured extraction helpers
//!
//! Independent pure functions over fixed regex families. Pain points and
//! desired features capture the keyword plus the sentence fragment up to
//! the next sentence terminator; timeline is an ordered phrase table where
//! the first table entry that matches wins (table order, not text order);
//! stage is checked most-committed-first so "researching X but now using Y"
//! reads as implemented.

use once_cell::sync::Lazy;
use regex::Regex;
use signal_radar_core::{ExtractionResult, Stage, Timeline};

const MAX_FRAGMENTS: usize = 5;

fn compile_family(sources: &[&str]) -> Vec<Regex> {
    sources
        .iter()
        .filter_map(|source| match Regex::new(source) {
            Ok(regex) => Some(regex),
            Err(error) => {
                tracing::warn!(pattern = %source, %error, "skipping unbuildable extraction pattern");
                None
            }
        })
        .collect()
}

static PAIN_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile_family(&[
        r"(?i)\b(?:problems?|issues?|trouble)\s+(?:with|is|are)\s+[^.!?\n]+",
        r"(?i)\bstruggl(?:e|es|ing)\s+(?:with|to)\s+[^.!?\n]+",
        r"(?i)\b(?:can't|can’t|cannot|can not|unable to)\s+[^.!?\n]+",
        r"(?i)\b(?:frustrated|annoyed)\s+(?:by|with)\s+[^.!?\n]+",
    ])
});

static FEATURE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile_family(&[
        r"(?i)\bwish (?:it|they|there|we|you) [^.!?\n]+",
        r"(?i)\bwould (?:love|like) (?:to|a|an|some)?\s*[^.!?\n]+",
        r"(?i)\b(?:need|needs|needed) (?:a|an|to|better|more)\s+[^.!?\n]+",
        r"(?i)\bmissing\s+[^.!?\n]+",
        r"(?i)\bno (?:way to|support for)\s+[^.!?\n]+",
    ])
});

static TIMELINE_PATTERNS: Lazy<Vec<(Regex, Timeline)>> = Lazy::new(|| {
    let table: &[(&str, Timeline)] = &[
        (
            r"(?i)\b(?:asap|right away|right now|immediately|urgently)\b",
            Timeline::Asap,
        ),
        (r"(?i)\bthis week\b", Timeline::ThisWeek),
        (r"(?i)\bthis month\b", Timeline::ThisMonth),
        (r"(?i)\bnext month\b", Timeline::NextMonth),
        (r"(?i)\bthis quarter\b", Timeline::ThisQuarter),
        (r"(?i)\bnext quarter\b", Timeline::NextQuarter),
        (
            r"(?i)\b(?:this year|by (?:the )?end of (?:the )?year)\b",
            Timeline::ThisYear,
        ),
        (
            r"(?i)\b(?:6 months|six months|half a year)\b",
            Timeline::SixMonths,
        ),
        (
            r"(?i)\b(?:12 months|twelve months|1 year|a year|next year)\b",
            Timeline::OneYear,
        ),
    ];
    table
        .iter()
        .filter_map(|(source, timeline)| match Regex::new(source) {
            Ok(regex) => Some((regex, *timeline)),
            Err(error) => {
                tracing::warn!(pattern = %source, %error, "skipping unbuildable timeline pattern");
                None
            }
        })
        .collect()
});

static STAGE_PATTERNS: Lazy<Vec<(Regex, Stage)>> = Lazy::new(|| {
    let table: &[(&str, Stage)] = &[
        (
            r"(?i)\b(?:now using|currently using|already using|switched to|in production|rolled out|implemented)\b",
            Stage::Implemented,
        ),
        (
            r"(?i)\b(?:decided|chose|chosen|went with|going with|signed up|purchased|bought)\b",
            Stage::Decided,
        ),
        (
            r"(?i)\b(?:evaluating|comparing|shortlisted|shortlisting|trialing|trialling|testing out|on a trial|demoing)\b",
            Stage::Evaluating,
        ),
        (
            r"(?i)\b(?:researching|looking into|exploring|reading up on|learning about|considering)\b",
            Stage::Researching,
        ),
    ];
    table
        .iter()
        .filter_map(|(source, stage)| match Regex::new(source) {
            Ok(regex) => Some((regex, *stage)),
            Err(error) => {
                tracing::warn!(pattern = %source, %error, "skipping unbuildable stage pattern");
                None
            }
        })
        .collect()
});

fn collect_fragments(patterns: &[Regex], text: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for pattern in patterns {
        for found in pattern.find_iter(text) {
            let fragment = found.as_str().trim();
            if fragment.is_empty() {
                continue;
            }
            if out.iter().any(|existing| existing == fragment) {
                continue;
            }
            out.push(fragment.to_string());
            if out.len() == MAX_FRAGMENTS {
                return out;
            }
        }
    }
    out
}

/// Pain phrases with their sentence fragment. Deduplicated post-trim,
/// capped at five, first-seen order (family order, then text order).
pub fn extract_pain_points(text: &str) -> Vec<String> {
    collect_fragments(&PAIN_PATTERNS, text)
}

/// Wished-for capabilities, same dedup/cap rules as pain points.
pub fn extract_desired_features(text: &str) -> Vec<String> {
    collect_fragments(&FEATURE_PATTERNS, text)
}

/// First matching entry of the ordered timeline table, or None.
pub fn detect_timeline(text: &str) -> Option<Timeline> {
    TIMELINE_PATTERNS
        .iter()
        .find(|(regex, _)| regex.is_match(text))
        .map(|(_, timeline)| *timeline)
}

/// Funnel stage by fixed priority; `Unknown` when nothing matches.
pub fn detect_stage(text: &str) -> Stage {
    STAGE_PATTERNS
        .iter()
        .find(|(regex, _)| regex.is_match(text))
        .map(|(_, stage)| *stage)
        .unwrap_or(Stage::Unknown)
}

/// Run all four helpers over the same text.
pub fn extract(text: &str) -> ExtractionResult {
    ExtractionResult {
        pain_points: extract_pain_points(text),
        desired_features: extract_desired_features(text),
        timeline: detect_timeline(text),
        stage: detect_stage(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pain_points_capture_sentence_fragments() {
        let text = "The problem with their exports is speed. We struggle with the API every day.";
        let points = extract_pain_points(text);
        assert!(points.contains(&"problem with their exports is speed".to_string()));
        assert!(points.contains(&"struggle with the API every day".to_string()));
        assert!(points.iter().all(|p| !p.ends_with('.')));
    }

    #[test]
    fn test_pain_points_deduplicate_repeats() {
        let text = "Can't export data. Can't export data. Can't export data.";
        assert_eq!(
            extract_pain_points(text),
            vec!["Can't export data".to_string()]
        );
    }

    #[test]
    fn test_pain_points_cap_at_five() {
        let text = "We can't export pdfs. We can't sync contacts. We can't invite users. \
                    We can't filter reports. We can't tag deals. We can't merge records.";
        let points = extract_pain_points(text);
        assert_eq!(points.len(), 5);
        let unique: std::collections::HashSet<_> = points.iter().collect();
        assert_eq!(unique.len(), 5);
    }

    #[test]
    fn test_features_cap_at_five() {
        let text = "We need a dashboard. We need a sandbox. We need a webhook. \
                    We need a parser. We need a planner. We need a scheduler.";
        let features = extract_desired_features(text);
        assert_eq!(features.len(), 5);
    }

    #[test]
    fn test_features_key_on_wish_and_missing_language() {
        let text = "I wish it had a dark mode. It's missing bulk actions entirely!";
        let features = extract_desired_features(text);
        assert!(features.contains(&"wish it had a dark mode".to_string()));
        assert!(features.contains(&"missing bulk actions entirely".to_string()));
    }

    #[test]
    fn test_timeline_follows_table_order_not_text_order() {
        // "next month" appears first in the text; "this week" wins because
        // it sits earlier in the table.
        assert_eq!(
            detect_timeline("We could do next month or maybe this week"),
            Some(Timeline::ThisWeek)
        );
        assert_eq!(detect_timeline("need it asap"), Some(Timeline::Asap));
        assert_eq!(
            detect_timeline("sometime within 6 months"),
            Some(Timeline::SixMonths)
        );
        assert_eq!(detect_timeline("no dates mentioned here"), None);
    }

    #[test]
    fn test_stage_priority_prefers_most_committed() {
        assert_eq!(
            detect_stage("We were researching tools but are now using Acme"),
            Stage::Implemented
        );
        assert_eq!(
            detect_stage("Comparing vendors and evaluating pricing"),
            Stage::Evaluating
        );
        assert_eq!(detect_stage("reading up on CRM options"), Stage::Researching);
        assert_eq!(detect_stage("We went with the cheaper plan"), Stage::Decided);
        assert_eq!(detect_stage("hello there"), Stage::Unknown);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let text = "Can't export data, wish it had an API, need it asap, currently using SheetsCo";
        assert_eq!(extract(text), extract(text));
    }

    #[test]
    fn test_extract_combines_all_fields() {
        let text = "We struggle with manual entry. I wish it had an API. \
                    Need to fix this asap since we are evaluating replacements.";
        let result = extract(text);
        assert!(!result.pain_points.is_empty());
        assert!(!result.desired_features.is_empty());
        assert_eq!(result.timeline, Some(Timeline::Asap));
        assert_eq!(result.stage, Stage::Evaluating);
    }

    #[test]
    fn test_empty_text_extracts_nothing() {
        let result = extract("");
        assert!(result.pain_points.is_empty());
        assert!(result.desired_features.is_empty());
        assert_eq!(result.timeline, None);
        assert_eq!(result.stage, Stage::Unknown);
    }
}
