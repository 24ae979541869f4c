//! Splits raw text into sentences and word tokens using a language profile.
//!
//! Tokenization is a plain character-class scan: maximal runs of word
//! characters become word tokens, everything between them becomes non-word
//! tokens. Languages that need dictionary-based segmentation are out of scope.

use crate::profile::CompiledProfile;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A maximal run of word or non-word characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The token as it appears in the substituted text.
    pub text: String,
    /// True when the token consists of the profile's word characters.
    pub is_word: bool,
    /// Byte range of the token in the substituted text.
    pub range: Range<usize>,
}

/// An ordered run of tokens ending at a sentence boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// Position of the sentence in the text, starting from 0.
    /// Sentence translations are aligned by this number.
    pub index: usize,
    pub tokens: Vec<Token>,
}

impl Sentence {
    /// The sentence as it appears in the substituted text.
    pub fn text(&self) -> String {
        self.tokens.iter().map(|t| t.text.as_str()).collect()
    }

    /// Iterates over the word tokens of the sentence.
    pub fn words(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(|t| t.is_word)
    }
}

/// The result of tokenizing a text.
///
/// Token ranges index into `text`, the input after character substitutions,
/// not into the raw input. Concatenating every token of every sentence in
/// order reconstructs `text` exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizedText {
    pub text: String,
    pub sentences: Vec<Sentence>,
}

impl TokenizedText {
    /// Iterates over the word tokens of every sentence in order.
    pub fn words(&self) -> impl Iterator<Item = &Token> {
        self.sentences.iter().flat_map(|s| s.words())
    }

    /// The number of running words in the text. Repeated words count every time.
    pub fn word_count(&self) -> usize {
        self.words().count()
    }
}

/// Tokenizes text into sentences of word and non-word tokens.
///
/// Sentences are non-overlapping, cover the whole substituted input and are
/// ordered by start offset. Empty input produces no sentences, input without
/// sentence delimiters produces exactly one.
pub fn tokenize(text: &str, profile: &CompiledProfile) -> TokenizedText {
    let text = profile.substitute(text);
    tracing::trace!("tokenizing {} bytes as {}", text.len(), profile.code());
    let tokens = split_tokens(&text, profile);
    let sentences = group_sentences(tokens, profile);
    TokenizedText { text, sentences }
}

/// Splits text into maximal same-class character runs.
///
/// Consecutive tokens always alternate between word and non-word.
fn split_tokens(text: &str, profile: &CompiledProfile) -> Vec<Token> {
    let mut tokens = Vec::new();
    let runs = text
        .char_indices()
        .chunk_by(|(_, c)| profile.is_word_char(*c));
    for (is_word, mut run) in &runs {
        let Some((start, first)) = run.next() else {
            continue;
        };
        let (last_start, last) = run.last().unwrap_or((start, first));
        let end = last_start + last.len_utf8();
        tokens.push(Token {
            text: text[start..end].to_string(),
            is_word,
            range: start..end,
        });
    }
    tokens
}

/// Groups a token stream into sentences.
///
/// Boundaries sit on token boundaries: the non-word token that carries the
/// delimiter belongs to the sentence it closes, and whatever follows starts
/// the next sentence. This keeps every token in exactly one sentence.
fn group_sentences(tokens: Vec<Token>, profile: &CompiledProfile) -> Vec<Sentence> {
    let mut sentences: Vec<Sentence> = Vec::new();
    let mut current: Vec<Token> = Vec::new();
    for token in tokens {
        if token.is_word {
            current.push(token);
            continue;
        }
        let closes = ends_sentence(&token, current.last(), profile);
        current.push(token);
        if closes {
            sentences.push(Sentence {
                index: sentences.len(),
                tokens: std::mem::take(&mut current),
            });
        }
    }
    if !current.is_empty() {
        sentences.push(Sentence {
            index: sentences.len(),
            tokens: current,
        });
    }
    sentences
}

/// Decides whether a non-word token ends the sentence being built.
///
/// A sentence delimiter in the token ends it, unless the delimiter is the
/// token's first character and the word right before it is a split exception
/// such as "Dr": then that delimiter is ordinary punctuation. Delimiters
/// further into the token can no longer sit next to the exception word and
/// always end the sentence, so "Dr.." still closes on the second dot.
fn ends_sentence(token: &Token, previous: Option<&Token>, profile: &CompiledProfile) -> bool {
    for (idx, c) in token.text.char_indices() {
        if !profile.is_sentence_delimiter(c) {
            continue;
        }
        if idx == 0 {
            // tokens alternate classes, so the previous token is always a word token
            if let Some(previous) = previous {
                if previous.is_word && profile.is_split_exception(&previous.text) {
                    continue;
                }
            }
        }
        return true;
    }
    false
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::profile::test_profiles;

    fn words(tokenized: &TokenizedText) -> Vec<&str> {
        tokenized.words().map(|t| t.text.as_str()).collect()
    }

    fn sentence_texts(tokenized: &TokenizedText) -> Vec<String> {
        tokenized.sentences.iter().map(|s| s.text()).collect()
    }

    #[test]
    fn empty_input() {
        let profile = test_profiles::english();
        let tokenized = tokenize("", &profile);
        assert!(tokenized.sentences.is_empty());
    }

    #[test]
    fn single_sentence_without_delimiter() {
        let profile = test_profiles::plain("a-zA-Z", ".!?");
        let tokenized = tokenize("hello there", &profile);
        assert_eq!(sentence_texts(&tokenized), &["hello there"]);
        assert_eq!(words(&tokenized), &["hello", "there"]);
    }

    #[test]
    fn two_sentences() {
        let profile = test_profiles::plain("a-zA-Z", ".!?");
        let tokenized = tokenize("Hello world. How are you?", &profile);
        assert_eq!(
            sentence_texts(&tokenized),
            &["Hello world. ", "How are you?"]
        );
        assert_eq!(words(&tokenized), &["Hello", "world", "How", "are", "you"]);
        assert_eq!(tokenized.word_count(), 5);
    }

    #[test]
    fn tokens_reconstruct_input() {
        let profile = test_profiles::plain("a-zA-Z", ".!?");
        let text = "  One, two... three!? And\nfour. ";
        let tokenized = tokenize(text, &profile);
        let rebuilt = tokenized
            .sentences
            .iter()
            .flat_map(|s| &s.tokens)
            .map(|t| t.text.as_str())
            .collect::<String>();
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn token_ranges_match_text() {
        let profile = test_profiles::plain("a-zäö", ".");
        let tokenized = tokenize("hyvää päivää.", &profile);
        for token in tokenized.sentences.iter().flat_map(|s| &s.tokens) {
            assert_eq!(&tokenized.text[token.range.clone()], token.text);
        }
    }

    #[test]
    fn split_exception_suppresses_break() {
        let profile = test_profiles::english();
        let tokenized = tokenize("Dr. Smith left.", &profile);
        assert_eq!(sentence_texts(&tokenized), &["Dr. Smith left."]);
    }

    #[test]
    fn split_exception_is_case_sensitive() {
        let profile = test_profiles::english();
        let tokenized = tokenize("dr. Smith left.", &profile);
        assert_eq!(tokenized.sentences.len(), 2);
    }

    #[test]
    fn exception_only_covers_adjacent_delimiter() {
        let profile = test_profiles::english();
        // the second dot no longer follows the exception word
        let tokenized = tokenize("Dr.. Smith left.", &profile);
        assert_eq!(sentence_texts(&tokenized), &["Dr.. ", "Smith left."]);
    }

    #[test]
    fn delimiter_run_closes_once() {
        let profile = test_profiles::plain("a-zA-Z", ".!?");
        let tokenized = tokenize("What...!? Nothing.", &profile);
        assert_eq!(sentence_texts(&tokenized), &["What...!? ", "Nothing."]);
    }

    #[test]
    fn all_punctuation_is_one_sentence() {
        let profile = test_profiles::plain("a-zA-Z", ".!?");
        let tokenized = tokenize("--- ...", &profile);
        assert_eq!(tokenized.sentences.len(), 1);
        assert_eq!(tokenized.word_count(), 0);
    }

    #[test]
    fn substitutions_apply_before_boundaries() {
        let profile = test_profiles::english();
        let tokenized = tokenize("It\u{2019}s done.", &profile);
        assert_eq!(tokenized.text, "It's done.");
        assert_eq!(words(&tokenized), &["It's", "done"]);
    }

    #[test]
    fn repeated_words_count_every_time() {
        let profile = test_profiles::plain("a-zA-Z", ".");
        let tokenized = tokenize("tick tock tick tock.", &profile);
        assert_eq!(tokenized.word_count(), 4);
    }

    #[test]
    fn unicode_word_characters() {
        let profile = test_profiles::plain("a-zA-ZÀ-ÖØ-öø-ȳ", ".!?");
        let tokenized = tokenize("Ääni kuului. Selvä.", &profile);
        assert_eq!(words(&tokenized), &["Ääni", "kuului", "Selvä"]);
        assert_eq!(tokenized.sentences.len(), 2);
    }
}
