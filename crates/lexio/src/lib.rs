//! Provides the core functionality of lexio: data-driven tokenization,
//! lesson segmentation and vocabulary coverage.

pub mod coverage;
pub mod profile;
pub mod segmenter;
pub mod tokenizer;

/// Normalizes a raw word token into the form terms are keyed by.
///
/// Normalization is Unicode-aware case folding and nothing more;
/// stemming and lemmatization are deliberately out of scope, so
/// "walk" and "walked" are distinct terms.
pub fn normalize_term(word: &str) -> String {
    word.to_lowercase()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn folds_case() {
        assert_eq!(normalize_term("Hello"), "hello");
        assert_eq!(normalize_term("ÉTÉ"), "été");
    }

    #[test]
    fn leaves_caseless_scripts_alone() {
        assert_eq!(normalize_term("日本語"), "日本語");
    }
}
