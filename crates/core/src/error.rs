//! Validation errors raised before any classification work begins
//!
//! The engine's only rejectable inputs are malformed lexicon entries and
//! unbuildable patterns, surfaced when a classifier or tier scorer is
//! constructed. Every text-shaped input (empty, huge, matchless, unusual
//! Unicode) is a normal case answered with a baseline result, never an
//! error, and classification never partially succeeds.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("lexicon entry {index} has an empty phrase")]
    EmptyPhrase { index: usize },

    #[error("lexicon phrase '{phrase}' has zero weight; weights must be at least 1")]
    ZeroWeight { phrase: String },

    #[error("pattern '{pattern}' failed to compile: {message}")]
    InvalidPattern { pattern: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_input() {
        let err = ValidationError::ZeroWeight {
            phrase: "buggy".to_string(),
        };
        assert!(err.to_string().contains("buggy"));

        let err = ValidationError::InvalidPattern {
            pattern: "(".to_string(),
            message: "unclosed group".to_string(),
        };
        assert!(err.to_string().contains('('));
        assert!(err.to_string().contains("unclosed group"));
    }
}
