//! Word coverage statistics for tokenized texts.
//!
//! Coverage counts running words, so a word repeated ten times moves the
//! numbers ten times. This matches how much of the text the reader actually
//! recognises while reading it.

use crate::{normalize_term, tokenizer::TokenizedText};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The lowest valid term status.
pub const MIN_STATUS: i32 = 1;
/// The highest valid term status.
pub const MAX_STATUS: i32 = 5;
/// Terms at or above this status count as known.
pub const KNOWN_STATUS_THRESHOLD: i32 = 3;

/// Checks that a term status is within the valid range.
pub fn valid_status(status: i32) -> bool {
    (MIN_STATUS..=MAX_STATUS).contains(&status)
}

/// How familiar the reader is with a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WordKind {
    Known,
    Learning,
    New,
}

/// Classifies a word by the status of its term, if any.
pub fn classify(status: Option<i32>) -> WordKind {
    match status {
        Some(status) if status >= KNOWN_STATUS_THRESHOLD => WordKind::Known,
        Some(_) => WordKind::Learning,
        None => WordKind::New,
    }
}

/// Running word counts for a text or a group of texts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coverage {
    pub total_words: i32,
    pub known_words: i32,
    pub learning_words: i32,
    pub new_words: i32,
}

impl Coverage {
    /// Counts one more word of the given kind.
    pub fn add(&mut self, kind: WordKind) {
        self.total_words += 1;
        match kind {
            WordKind::Known => self.known_words += 1,
            WordKind::Learning => self.learning_words += 1,
            WordKind::New => self.new_words += 1,
        }
    }

    /// Sums the counts of two coverages, for example over the texts of a book.
    pub fn merge(self, other: Self) -> Self {
        Self {
            total_words: self.total_words + other.total_words,
            known_words: self.known_words + other.known_words,
            learning_words: self.learning_words + other.learning_words,
            new_words: self.new_words + other.new_words,
        }
    }

    /// The fraction of running words that are known, or zero for empty texts.
    pub fn fraction_known(self) -> f64 {
        if self.total_words == 0 {
            0.0
        } else {
            f64::from(self.known_words) / f64::from(self.total_words)
        }
    }
}

/// Computes coverage for a tokenized text.
///
/// `statuses` maps normalized terms to their status. Words are normalized
/// before lookup, so "The" matches a term stored as "the".
pub fn compute(tokenized: &TokenizedText, statuses: &HashMap<String, i32>) -> Coverage {
    let mut coverage = Coverage::default();
    for word in tokenized.words() {
        let status = statuses.get(&normalize_term(&word.text)).copied();
        coverage.add(classify(status));
    }
    coverage
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{profile::test_profiles, tokenizer::tokenize};

    fn statuses(pairs: &[(&str, i32)]) -> HashMap<String, i32> {
        pairs
            .iter()
            .map(|(term, status)| (term.to_string(), *status))
            .collect()
    }

    #[test]
    fn status_range() {
        assert!(!valid_status(0));
        assert!(valid_status(1));
        assert!(valid_status(5));
        assert!(!valid_status(6));
    }

    #[test]
    fn classifies_by_threshold() {
        assert_eq!(classify(None), WordKind::New);
        assert_eq!(classify(Some(1)), WordKind::Learning);
        assert_eq!(classify(Some(2)), WordKind::Learning);
        assert_eq!(classify(Some(3)), WordKind::Known);
        assert_eq!(classify(Some(5)), WordKind::Known);
    }

    #[test]
    fn counts_running_words() {
        let profile = test_profiles::plain("a-zA-Z", ".");
        let tokenized = tokenize("the cat sat on the mat.", &profile);
        let coverage = compute(&tokenized, &statuses(&[("the", 5), ("cat", 3), ("sat", 2)]));
        assert_eq!(
            coverage,
            Coverage {
                total_words: 6,
                known_words: 3,
                learning_words: 1,
                new_words: 2,
            }
        );
    }

    #[test]
    fn kinds_sum_to_total() {
        let profile = test_profiles::plain("a-zA-Z", ".!?");
        let tokenized = tokenize("One two three. Four five? Six!", &profile);
        let coverage = compute(&tokenized, &statuses(&[("one", 4), ("four", 1)]));
        assert_eq!(
            coverage.known_words + coverage.learning_words + coverage.new_words,
            coverage.total_words
        );
        assert_eq!(coverage.total_words, 6);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let profile = test_profiles::plain("a-zA-Z", ".");
        let tokenized = tokenize("The THE the.", &profile);
        let coverage = compute(&tokenized, &statuses(&[("the", 3)]));
        assert_eq!(coverage.known_words, 3);
        assert_eq!(coverage.new_words, 0);
    }

    #[test]
    fn empty_text_is_all_zeroes() {
        let profile = test_profiles::plain("a-zA-Z", ".");
        let tokenized = tokenize("", &profile);
        let coverage = compute(&tokenized, &HashMap::new());
        assert_eq!(coverage, Coverage::default());
        assert_eq!(coverage.fraction_known(), 0.0);
    }

    #[test]
    fn fraction_of_known_words() {
        let coverage = Coverage {
            total_words: 8,
            known_words: 6,
            learning_words: 1,
            new_words: 1,
        };
        assert!((coverage.fraction_known() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn merge_sums_counts() {
        let a = Coverage {
            total_words: 5,
            known_words: 3,
            learning_words: 1,
            new_words: 1,
        };
        let b = Coverage {
            total_words: 2,
            known_words: 0,
            learning_words: 2,
            new_words: 0,
        };
        let merged = a.merge(b);
        assert_eq!(merged.total_words, 7);
        assert_eq!(merged.known_words, 3);
        assert_eq!(merged.learning_words, 3);
        assert_eq!(merged.new_words, 1);
    }
}
