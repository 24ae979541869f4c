//! Splits texts into lesson-sized chunks along paragraph or sentence boundaries.

use crate::{profile::CompiledProfile, tokenizer};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The kind of unit a text is split into before packing chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitMethod {
    Paragraph,
    Sentence,
}

impl SplitMethod {
    /// The separator placed between units when they are joined into a chunk.
    pub fn separator(self) -> &'static str {
        match self {
            Self::Paragraph => "\n\n",
            Self::Sentence => " ",
        }
    }
}

#[derive(Debug, Error)]
pub enum SegmentError {
    #[error("maximum segment size must be at least 1")]
    InvalidMaxSize,
}

/// Splits text into chunks of at most `max_size` characters.
///
/// Chunks never split a paragraph or sentence in half: a unit longer than
/// `max_size` becomes a chunk of its own instead. Unit order is preserved,
/// so joining the chunks with the method's separator restores the text with
/// its units joined by that separator.
pub fn segment(
    text: &str,
    profile: &CompiledProfile,
    method: SplitMethod,
    max_size: usize,
) -> Result<Vec<String>, SegmentError> {
    if max_size == 0 {
        return Err(SegmentError::InvalidMaxSize);
    }
    tracing::debug!(
        "segmenting {} bytes by {:?} with max size {max_size}",
        text.len(),
        method
    );
    let units = match method {
        SplitMethod::Paragraph => paragraph_units(text),
        SplitMethod::Sentence => sentence_units(text, profile),
    };
    Ok(pack_units(units, method.separator(), max_size))
}

/// Splits text into paragraphs, maximal runs of non-blank lines.
///
/// Lines inside a paragraph stay joined by a single newline. Line endings
/// are normalised to `\n` and blank lines may contain whitespace.
fn paragraph_units(text: &str) -> Vec<String> {
    let mut units = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                units.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        units.push(current.join("\n"));
    }
    units
}

/// Splits text into trimmed sentences using the language profile.
fn sentence_units(text: &str, profile: &CompiledProfile) -> Vec<String> {
    tokenizer::tokenize(text, profile)
        .sentences
        .iter()
        .map(|s| s.text().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Packs units into chunks greedily, keeping each chunk within `max_size`
/// characters. The separator between units counts towards the size.
fn pack_units(units: Vec<String>, separator: &str, max_size: usize) -> Vec<String> {
    let separator_len = separator.chars().count();
    let mut chunks = Vec::new();
    let mut chunk = String::new();
    let mut chunk_len = 0;
    for unit in units {
        let unit_len = unit.chars().count();
        if !chunk.is_empty() && chunk_len + separator_len + unit_len > max_size {
            chunks.push(std::mem::take(&mut chunk));
            chunk_len = 0;
        }
        if !chunk.is_empty() {
            chunk.push_str(separator);
            chunk_len += separator_len;
        }
        chunk.push_str(&unit);
        chunk_len += unit_len;
    }
    if !chunk.is_empty() {
        chunks.push(chunk);
    }
    chunks
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::profile::test_profiles;

    #[test]
    fn rejects_zero_max_size() {
        let profile = test_profiles::english();
        let err = segment("text", &profile, SplitMethod::Paragraph, 0);
        assert!(matches!(err, Err(SegmentError::InvalidMaxSize)));
    }

    #[test]
    fn empty_text_has_no_chunks() {
        let profile = test_profiles::english();
        let chunks = segment("", &profile, SplitMethod::Paragraph, 100).unwrap();
        assert!(chunks.is_empty());
        let chunks = segment(" \n \n", &profile, SplitMethod::Paragraph, 100).unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn packs_paragraphs_up_to_max_size() {
        let profile = test_profiles::english();
        let text = "one\n\ntwo\n\nthree";
        let chunks = segment(text, &profile, SplitMethod::Paragraph, 10).unwrap();
        assert_eq!(chunks, &["one\n\ntwo", "three"]);
    }

    #[test]
    fn oversized_paragraph_gets_its_own_chunk() {
        let profile = test_profiles::english();
        let long = "x".repeat(30);
        let text = format!("aaaa\n\n{long}\n\nbbbb");
        let chunks = segment(&text, &profile, SplitMethod::Paragraph, 20).unwrap();
        assert_eq!(chunks, &["aaaa".to_string(), long, "bbbb".to_string()]);
    }

    #[test]
    fn multiline_paragraph_stays_together() {
        let profile = test_profiles::english();
        let text = "line one\nline two\n\nnext";
        let chunks = segment(text, &profile, SplitMethod::Paragraph, 100).unwrap();
        assert_eq!(chunks, &["line one\nline two\n\nnext"]);
    }

    #[test]
    fn blank_line_runs_collapse_to_one_separator() {
        let profile = test_profiles::english();
        let chunks = segment("one\n\n\n\ntwo", &profile, SplitMethod::Paragraph, 100).unwrap();
        assert_eq!(chunks, &["one\n\ntwo"]);
    }

    #[test]
    fn packs_sentences_with_spaces() {
        let profile = test_profiles::plain("a-zA-Z", ".!?");
        let text = "One two. Three four. Five six.";
        let chunks = segment(text, &profile, SplitMethod::Sentence, 20).unwrap();
        assert_eq!(chunks, &["One two. Three four.", "Five six."]);
    }

    #[test]
    fn separator_counts_towards_chunk_size() {
        let profile = test_profiles::plain("a-zA-Z", ".");
        // two five-character sentences fit in 11 with the space, not in 10
        let text = "abcd. efgh.";
        let chunks = segment(text, &profile, SplitMethod::Sentence, 10).unwrap();
        assert_eq!(chunks, &["abcd.", "efgh."]);
        let chunks = segment(text, &profile, SplitMethod::Sentence, 11).unwrap();
        assert_eq!(chunks, &["abcd. efgh."]);
    }

    #[test]
    fn size_is_measured_in_characters() {
        let profile = test_profiles::plain("a-zäö", ".");
        // each sentence is 6 characters but more bytes
        let text = "äääää. ööööö.";
        let chunks = segment(text, &profile, SplitMethod::Sentence, 13).unwrap();
        assert_eq!(chunks, &["äääää. ööööö."]);
    }

    #[test]
    fn chunks_join_back_into_units() {
        let profile = test_profiles::plain("a-zA-Z", ".!?");
        let text = "One two. Three! Four five six? Seven.";
        for max_size in [1, 8, 15, 100] {
            let chunks = segment(text, &profile, SplitMethod::Sentence, max_size).unwrap();
            assert_eq!(chunks.join(" "), "One two. Three! Four five six? Seven.");
        }
    }

    #[test]
    fn split_method_tags_are_snake_case() {
        let tag = serde_json::to_string(&SplitMethod::Paragraph).unwrap();
        assert_eq!(tag, "\"paragraph\"");
        let parsed: SplitMethod = serde_json::from_str("\"sentence\"").unwrap();
        assert_eq!(parsed, SplitMethod::Sentence);
    }

    #[test]
    fn multi_unit_chunks_respect_max_size() {
        let profile = test_profiles::plain("a-zA-Z", ".");
        let text = "aa. bbbb. cc. dddddd. e.";
        let chunks = segment(text, &profile, SplitMethod::Sentence, 12).unwrap();
        for chunk in &chunks {
            if chunk.contains(". ") {
                assert!(chunk.chars().count() <= 12, "oversized chunk {chunk:?}");
            }
        }
    }
}
