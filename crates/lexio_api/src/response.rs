pub use chrono::{DateTime, Utc};
pub use lexio::{
    coverage::Coverage,
    segmenter::SplitMethod,
    tokenizer::{Sentence, Token, TokenizedText},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageProfile {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub word_characters: String,
    pub sentence_delimiters: String,
    pub split_exceptions: Vec<String>,
    pub substitutions: Vec<Substitution>,
    pub right_to_left: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Substitution {
    pub pattern: String,
    pub replacement: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Term {
    pub id: i32,
    pub term: String,
    pub status: i32,
    pub translation: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Text {
    pub id: i32,
    pub title: String,
    pub part_number: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextDetails {
    pub id: i32,
    pub title: String,
    pub right_to_left: bool,
    pub sentences: Vec<AnnotatedSentence>,
    pub coverage: Coverage,
    pub audio_anchors: Vec<AudioAnchor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotatedSentence {
    pub sentence_index: i32,
    pub translation: Option<String>,
    pub tokens: Vec<AnnotatedToken>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotatedToken {
    pub text: String,
    pub is_word: bool,
    pub term_id: Option<i32>,
    pub status: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioAnchor {
    pub position_seconds: f64,
    pub text_offset: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub total_words: i32,
    pub known_words: i32,
    pub learning_words: i32,
    pub is_finished: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookDetails {
    pub id: i32,
    pub title: String,
    pub parts: Vec<Text>,
    pub coverage: Coverage,
    pub last_read_text_id: Option<i32>,
    pub is_finished: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageStatistics {
    pub total_words_read: i64,
    pub total_texts_completed: i32,
    pub total_books_completed: i32,
    pub total_seconds_listened: i64,
}
