//! Phrase matching primitive shared by both scoring modes
//!
//! Phrases compile to word-boundary regexes (`\b` around the escaped
//! phrase, `(?i)` unless case-sensitive), so "vs" does not match inside
//! "advsomething". This is stricter than raw substring containment on
//! purpose. Matching is first-occurrence per phrase: a phrase counts once
//! toward scoring no matter how often it occurs, and only its first
//! position feeds the evidence excerpt. Containment semantics, not
//! frequency counting.
//!
//! Case-insensitive matching uses the `(?i)` flag on the original text
//! rather than a lowercased copy, so byte offsets never drift on non-ASCII
//! case folds; offsets convert to character positions before they leave
//! this module.

use regex::Regex;
use signal_radar_core::{Category, Excerpt, Lexicon, PhraseMatch, ValidationError};
use std::collections::HashMap;
use unicode_segmentation::UnicodeSegmentation;

/// One phrase with its compiled pattern.
#[derive(Debug, Clone)]
pub struct CompiledPhrase {
    pub phrase: String,
    regex: Regex,
}

impl CompiledPhrase {
    fn first_occurrence<'t>(&self, text: &'t str) -> Option<regex::Match<'t>> {
        self.regex.find(text)
    }
}

fn compile_phrase(phrase: &str, case_sensitive: bool) -> Result<Regex, ValidationError> {
    let non_word = |c: char| !(c.is_alphanumeric() || c == '_');
    if phrase.chars().next().is_some_and(non_word) || phrase.chars().last().is_some_and(non_word) {
        tracing::warn!(
            %phrase,
            "phrase edge is not a word character; the boundary pattern will not match it after \
             spaces or punctuation"
        );
    }
    let escaped = regex::escape(phrase);
    let source = if case_sensitive {
        format!(r"\b{}\b", escaped)
    } else {
        format!(r"(?i)\b{}\b", escaped)
    };
    Regex::new(&source).map_err(|e| ValidationError::InvalidPattern {
        pattern: phrase.to_string(),
        message: e.to_string(),
    })
}

/// A plain phrase list compiled for presence scanning (the tier scorer's
/// shape: no categories, no weights).
#[derive(Debug, Clone)]
pub struct PhraseSet {
    patterns: Vec<CompiledPhrase>,
}

impl PhraseSet {
    pub fn compile(phrases: &[String], case_sensitive: bool) -> Result<Self, ValidationError> {
        let mut patterns = Vec::with_capacity(phrases.len());
        for (index, phrase) in phrases.iter().enumerate() {
            if phrase.trim().is_empty() {
                return Err(ValidationError::EmptyPhrase { index });
            }
            patterns.push(CompiledPhrase {
                phrase: phrase.clone(),
                regex: compile_phrase(phrase, case_sensitive)?,
            });
        }
        Ok(Self { patterns })
    }

    /// First occurrence of each present phrase, in list order.
    pub fn scan(&self, text: &str, context_window: u32) -> Vec<Excerpt> {
        self.patterns
            .iter()
            .filter_map(|compiled| {
                compiled.first_occurrence(text).map(|found| Excerpt {
                    phrase: compiled.phrase.clone(),
                    snippet: excerpt_snippet(text, found.start(), found.end(), context_window),
                    position: char_position(text, found.start()),
                })
            })
            .collect()
    }
}

/// A lexicon hit paired with its evidence excerpt.
#[derive(Debug, Clone)]
pub struct MatchHit {
    pub matched: PhraseMatch,
    pub excerpt: Excerpt,
}

#[derive(Debug, Clone)]
struct CompiledEntry {
    phrase: String,
    category: Category,
    weight: u32,
    pattern: CompiledPhrase,
}

/// A weighted lexicon compiled for scanning. Entries keep lexicon order;
/// duplicate phrase+category pairs collapse last-wins (first occurrence
/// keeps its slot, the later weight applies).
#[derive(Debug, Clone)]
pub struct CompiledLexicon {
    name: String,
    entries: Vec<CompiledEntry>,
}

impl CompiledLexicon {
    pub fn compile(lexicon: &Lexicon, case_sensitive: bool) -> Result<Self, ValidationError> {
        let mut entries: Vec<CompiledEntry> = Vec::with_capacity(lexicon.entries.len());
        let mut seen: HashMap<(String, Category), usize> = HashMap::new();

        for (index, entry) in lexicon.entries.iter().enumerate() {
            if entry.phrase.trim().is_empty() {
                return Err(ValidationError::EmptyPhrase { index });
            }
            if entry.weight == 0 {
                return Err(ValidationError::ZeroWeight {
                    phrase: entry.phrase.clone(),
                });
            }

            let key_phrase = if case_sensitive {
                entry.phrase.clone()
            } else {
                entry.phrase.to_lowercase()
            };
            match seen.entry((key_phrase, entry.category)) {
                std::collections::hash_map::Entry::Occupied(slot) => {
                    entries[*slot.get()].weight = entry.weight;
                }
                std::collections::hash_map::Entry::Vacant(slot) => {
                    slot.insert(entries.len());
                    entries.push(CompiledEntry {
                        phrase: entry.phrase.clone(),
                        category: entry.category,
                        weight: entry.weight,
                        pattern: CompiledPhrase {
                            phrase: entry.phrase.clone(),
                            regex: compile_phrase(&entry.phrase, case_sensitive)?,
                        },
                    });
                }
            }
        }

        Ok(Self {
            name: lexicon.name.clone(),
            entries,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First occurrence of each matching entry, in lexicon order.
    pub fn scan(&self, text: &str, context_window: u32) -> Vec<MatchHit> {
        self.entries
            .iter()
            .filter_map(|entry| {
                entry.pattern.first_occurrence(text).map(|found| {
                    let position = char_position(text, found.start());
                    MatchHit {
                        matched: PhraseMatch {
                            phrase: entry.phrase.clone(),
                            category: entry.category,
                            weight: entry.weight,
                            position,
                        },
                        excerpt: Excerpt {
                            phrase: entry.phrase.clone(),
                            snippet: excerpt_snippet(
                                text,
                                found.start(),
                                found.end(),
                                context_window,
                            ),
                            position,
                        },
                    }
                })
            })
            .collect()
    }
}

pub(crate) fn char_position(text: &str, byte_offset: usize) -> usize {
    text[..byte_offset].chars().count()
}

/// Context snippet around a match: up to half the window on each side, cut
/// on grapheme boundaries so multi-byte clusters never split.
pub(crate) fn excerpt_snippet(text: &str, start: usize, end: usize, window: u32) -> String {
    let half = (window / 2) as usize;

    let before: Vec<(usize, &str)> = text[..start].grapheme_indices(true).collect();
    let lead = before.len().saturating_sub(half);
    let snippet_start = before.get(lead).map(|(offset, _)| *offset).unwrap_or(start);

    let after: Vec<(usize, &str)> = text[end..].grapheme_indices(true).collect();
    let snippet_end = if after.len() > half {
        end + after[half].0
    } else {
        text.len()
    };

    text[snippet_start..snippet_end].to_string()
}
