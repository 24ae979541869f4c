use lexio::segmenter::SplitMethod;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewLanguageProfile<'a> {
    pub code: Cow<'a, str>,
    pub name: Cow<'a, str>,
    pub word_characters: Cow<'a, str>,
    pub sentence_delimiters: Cow<'a, str>,
    pub split_exceptions: Vec<Cow<'a, str>>,
    pub substitutions: Vec<NewSubstitution<'a>>,
    pub right_to_left: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewSubstitution<'a> {
    pub pattern: Cow<'a, str>,
    pub replacement: Cow<'a, str>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewText<'a> {
    pub language_id: i32,
    pub title: Cow<'a, str>,
    pub content: Cow<'a, str>,
    pub audio_anchors: Vec<NewAudioAnchor>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewAudioAnchor {
    pub position_seconds: f64,
    pub text_offset: i32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewBook<'a> {
    pub language_id: i32,
    pub title: Cow<'a, str>,
    pub content: Cow<'a, str>,
    pub split_method: SplitMethod,
    pub max_segment_size: i32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SegmentDocument<'a> {
    pub document: Cow<'a, str>,
    pub split_method: SplitMethod,
    pub max_segment_size: i32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SetTermStatus<'a> {
    pub status: i32,
    pub translation: Option<Cow<'a, str>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TranslatedSentence<'a> {
    pub sentence_index: i32,
    pub translation: Cow<'a, str>,
}
