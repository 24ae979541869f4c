//! Per-language tokenization rules.
//!
//! A [`LanguageProfile`] is plain data supplied by the configuration store:
//! which characters make up words, which characters end sentences, which
//! words never end one, and which literal substitutions to apply before any
//! of that is decided. Profiles are validated once by [`LanguageProfile::compile`]
//! and the resulting [`CompiledProfile`] is what the tokenizer works with, so a
//! malformed profile is rejected at load time and never mid-tokenize.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Data-driven ruleset describing how to tokenize a single language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageProfile {
    /// Short unique identifier, e.g. "en" or "fi".
    pub code: String,
    pub name: String,
    /// Regex character class body (without the brackets) matching the
    /// characters words are made of, e.g. `a-zA-ZÀ-ÖØ-öø-ȳ`.
    pub word_characters: String,
    /// Characters that may end a sentence, e.g. `.!?`.
    pub sentence_delimiters: String,
    /// Words after which a delimiter does not end the sentence, e.g. "Dr".
    /// Matched case-sensitively against the preceding word token.
    pub split_exceptions: Vec<String>,
    /// Literal replacements applied to raw text before tokenization,
    /// e.g. curly quotes to straight quotes.
    pub substitutions: Vec<Substitution>,
    /// Presentation hint only; tokenization order is unaffected.
    pub right_to_left: bool,
}

/// A single literal character substitution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    pub pattern: String,
    pub replacement: String,
}

impl Substitution {
    pub fn new(pattern: &str, replacement: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            replacement: replacement.to_string(),
        }
    }
}

/// Error for rejecting a malformed language profile.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("invalid word character class for language '{code}'")]
    InvalidWordCharacters {
        code: String,
        #[source]
        source: regex::Error,
    },
    #[error("empty substitution pattern for language '{code}'")]
    EmptySubstitution { code: String },
}

impl LanguageProfile {
    /// Validates the profile and prepares it for tokenization.
    pub fn compile(self) -> Result<CompiledProfile, ProfileError> {
        let word_matcher = Regex::new(&format!("[{}]", self.word_characters)).map_err(|source| {
            ProfileError::InvalidWordCharacters {
                code: self.code.clone(),
                source,
            }
        })?;
        if self.substitutions.iter().any(|s| s.pattern.is_empty()) {
            return Err(ProfileError::EmptySubstitution { code: self.code });
        }

        // longest pattern first so that overlapping keys resolve deterministically
        let mut substitutions = self.substitutions.clone();
        substitutions.sort_by(|a, b| b.pattern.len().cmp(&a.pattern.len()));
        let split_exceptions = self.split_exceptions.iter().cloned().collect();

        Ok(CompiledProfile {
            word_matcher,
            substitutions,
            split_exceptions,
            profile: self,
        })
    }
}

/// A [`LanguageProfile`] that passed validation.
#[derive(Debug, Clone)]
pub struct CompiledProfile {
    profile: LanguageProfile,
    word_matcher: Regex,
    /// Sorted longest pattern first.
    substitutions: Vec<Substitution>,
    split_exceptions: HashSet<String>,
}

impl CompiledProfile {
    /// The profile this was compiled from, substitutions in their original order.
    pub fn profile(&self) -> &LanguageProfile {
        &self.profile
    }

    pub fn code(&self) -> &str {
        &self.profile.code
    }

    pub fn is_word_char(&self, c: char) -> bool {
        let mut buf = [0; 4];
        self.word_matcher.is_match(c.encode_utf8(&mut buf))
    }

    pub fn is_sentence_delimiter(&self, c: char) -> bool {
        self.profile.sentence_delimiters.contains(c)
    }

    pub fn is_split_exception(&self, word: &str) -> bool {
        self.split_exceptions.contains(word)
    }

    /// Applies the profile's substitutions in a single left-to-right pass.
    ///
    /// At each position the longest matching pattern wins and scanning
    /// continues after the replacement, so replacement output is never
    /// itself substituted.
    pub fn substitute(&self, text: &str) -> String {
        if self.substitutions.is_empty() {
            return text.to_string();
        }
        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        'scan: while !rest.is_empty() {
            for substitution in &self.substitutions {
                if let Some(stripped) = rest.strip_prefix(substitution.pattern.as_str()) {
                    out.push_str(&substitution.replacement);
                    rest = stripped;
                    continue 'scan;
                }
            }
            let mut chars = rest.chars();
            if let Some(c) = chars.next() {
                out.push(c);
            }
            rest = chars.as_str();
        }
        out
    }
}

#[cfg(test)]
pub(crate) mod test_profiles {
    use super::*;

    pub fn english() -> CompiledProfile {
        LanguageProfile {
            code: "en".to_string(),
            name: "English".to_string(),
            word_characters: "a-zA-Z'".to_string(),
            sentence_delimiters: ".!?".to_string(),
            split_exceptions: vec!["Dr".to_string(), "Mr".to_string(), "Sr".to_string()],
            substitutions: vec![
                Substitution::new("\u{2019}", "'"),
                Substitution::new("\u{201c}", "\""),
                Substitution::new("\u{201d}", "\""),
            ],
            right_to_left: false,
        }
        .compile()
        .unwrap()
    }

    pub fn plain(word_characters: &str, sentence_delimiters: &str) -> CompiledProfile {
        LanguageProfile {
            code: "xx".to_string(),
            name: "Test".to_string(),
            word_characters: word_characters.to_string(),
            sentence_delimiters: sentence_delimiters.to_string(),
            split_exceptions: Vec::new(),
            substitutions: Vec::new(),
            right_to_left: false,
        }
        .compile()
        .unwrap()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn compiles_word_characters() {
        let profile = test_profiles::plain("a-zA-ZÀ-ÖØ-öø-ȳ", ".!?");
        assert!(profile.is_word_char('a'));
        assert!(profile.is_word_char('Ä'));
        assert!(!profile.is_word_char(' '));
        assert!(!profile.is_word_char('.'));
        assert!(!profile.is_word_char('7'));
    }

    #[test]
    fn rejects_invalid_word_characters() {
        let err = LanguageProfile {
            code: "xx".to_string(),
            name: "Broken".to_string(),
            word_characters: "z-a".to_string(),
            sentence_delimiters: ".".to_string(),
            split_exceptions: Vec::new(),
            substitutions: Vec::new(),
            right_to_left: false,
        }
        .compile()
        .unwrap_err();
        assert!(matches!(
            err,
            ProfileError::InvalidWordCharacters { ref code, .. } if code == "xx"
        ));
    }

    #[test]
    fn rejects_empty_substitution_pattern() {
        let err = LanguageProfile {
            code: "xx".to_string(),
            name: "Broken".to_string(),
            word_characters: "a-z".to_string(),
            sentence_delimiters: ".".to_string(),
            split_exceptions: Vec::new(),
            substitutions: vec![Substitution::new("", "nothing")],
            right_to_left: false,
        }
        .compile()
        .unwrap_err();
        assert!(matches!(err, ProfileError::EmptySubstitution { .. }));
    }

    #[test]
    fn substitutes_longest_match_first() {
        let profile = LanguageProfile {
            code: "xx".to_string(),
            name: "Test".to_string(),
            word_characters: "a-z".to_string(),
            sentence_delimiters: ".".to_string(),
            split_exceptions: Vec::new(),
            substitutions: vec![
                Substitution::new("a", "1"),
                Substitution::new("ab", "2"),
            ],
            right_to_left: false,
        }
        .compile()
        .unwrap();
        assert_eq!(profile.substitute("aba"), "21");
    }

    #[test]
    fn does_not_rescan_replacements() {
        let profile = LanguageProfile {
            code: "xx".to_string(),
            name: "Test".to_string(),
            word_characters: "a-z".to_string(),
            sentence_delimiters: ".".to_string(),
            split_exceptions: Vec::new(),
            substitutions: vec![Substitution::new("x", "xx")],
            right_to_left: false,
        }
        .compile()
        .unwrap();
        assert_eq!(profile.substitute("axa"), "axxa");
    }

    #[test]
    fn substitutes_curly_quotes() {
        let profile = test_profiles::english();
        assert_eq!(profile.substitute("it\u{2019}s \u{201c}fine\u{201d}"), "it's \"fine\"");
    }
}
