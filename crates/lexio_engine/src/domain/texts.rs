//! Functions and types related to texts.

use crate::{
    domain::profiles,
    error::{EngineError, EngineResult},
    queries, query,
    utils::database,
    LexioState,
};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use lexio::{
    coverage::{classify, Coverage},
    tokenizer::{self, TokenizedText},
};
use lexio_api::{request as req, response as res};
use std::collections::HashMap;

/// Tokenizes text using the profile of the given language.
pub fn tokenize(
    state: &LexioState,
    language_code: &str,
    text: &str,
) -> EngineResult<TokenizedText> {
    let profile = profiles::compiled_by_code(state, language_code)?;
    Ok(tokenizer::tokenize(text, &profile))
}

/// Inserts a new standalone text for the user.
pub fn insert(state: &LexioState, user_id: i32, new_text: req::NewText<'_>) -> EngineResult<i32> {
    use crate::schema::texts as t;
    tracing::info!("Inserting text");

    let req::NewText {
        language_id,
        title,
        content,
        audio_anchors,
    } = new_text;
    if content.trim().is_empty() {
        return Err(EngineError::validation("text content must not be empty"));
    }
    let profile = profiles::compiled(state, language_id)?;
    let word_count = tokenizer::tokenize(&content, &profile).word_count() as i32;
    let audio_anchors = audio_anchors
        .into_iter()
        .map(database::AudioAnchor::from)
        .collect::<Vec<_>>();

    let mut conn = state.pool.get()?;
    let id = diesel::insert_into(t::table)
        .values((
            t::user_id.eq(user_id),
            t::language_id.eq(language_id),
            t::title.eq(title.as_ref()),
            t::content.eq(content.as_ref()),
            t::word_count.eq(word_count),
            t::audio_anchors.eq(audio_anchors),
        ))
        .returning(t::id)
        .get_result::<i32>(&mut conn)?;

    Ok(id)
}

query! {
    pub struct Text {
        pub id: i32 = texts::id,
        pub title: String = texts::title,
        pub part_number: Option<i32> = texts::part_number,
        pub created_at: DateTime<Utc> = texts::created_at,
    }
}

impl From<Text> for res::Text {
    fn from(value: Text) -> Self {
        res::Text {
            id: value.id,
            title: value.title,
            part_number: value.part_number,
            created_at: value.created_at,
        }
    }
}

/// Gets the user's standalone texts for a language, newest first.
///
/// Texts that belong to a book are listed through the book instead.
pub fn get_all(
    state: &LexioState,
    user_id: i32,
    language_id: i32,
) -> EngineResult<Vec<res::Text>> {
    use crate::schema::texts as t;
    tracing::info!("Fetching texts");

    let mut conn = state.pool.get()?;
    let texts = t::table
        .select(Text::as_select())
        .filter(
            t::user_id
                .eq(user_id)
                .and(t::language_id.eq(language_id))
                .and(t::book_id.is_null()),
        )
        .order(t::created_at.desc())
        .get_results(&mut conn)?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(texts)
}

query! {
    struct ReaderText {
        id: i32 = texts::id,
        language_id: i32 = texts::language_id,
        title: String = texts::title,
        content: String = texts::content,
        audio_anchors: Vec<Option<database::AudioAnchor>> = texts::audio_anchors,
    }
}

/// Builds the reader payload for a text: tokenized sentences with each word
/// annotated by the user's term for it, sentence translations joined by
/// index, and the text's coverage.
pub fn read(state: &LexioState, user_id: i32, text_id: i32) -> EngineResult<res::TextDetails> {
    use crate::schema::{sentence_translations as st, terms as t, texts as tx};
    tracing::info!("Reading text {text_id}");

    let mut conn = state.pool.get()?;
    let text = tx::table
        .select(ReaderText::as_select())
        .filter(tx::id.eq(text_id).and(tx::user_id.eq(user_id)))
        .get_result(&mut conn)
        .optional()?
        .ok_or_else(|| EngineError::not_found("text", text_id))?;
    let profile = profiles::compiled(state, text.language_id)?;
    let tokenized = tokenizer::tokenize(&text.content, &profile);

    let terms = t::table
        .select((t::term, (t::id, t::status)))
        .filter(t::user_id.eq(user_id).and(t::language_id.eq(text.language_id)))
        .get_results::<(String, (i32, i32))>(&mut conn)?
        .into_iter()
        .collect::<HashMap<_, _>>();
    let translations = st::table
        .select((st::sentence_index, st::translation))
        .filter(st::text_id.eq(text_id))
        .get_results::<(i32, String)>(&mut conn)?
        .into_iter()
        .collect::<HashMap<_, _>>();

    let mut coverage = Coverage::default();
    let mut sentences = Vec::with_capacity(tokenized.sentences.len());
    for sentence in &tokenized.sentences {
        let sentence_index = sentence.index as i32;
        let mut tokens = Vec::with_capacity(sentence.tokens.len());
        for token in &sentence.tokens {
            let term = token
                .is_word
                .then(|| terms.get(&lexio::normalize_term(&token.text)))
                .flatten();
            if token.is_word {
                coverage.add(classify(term.map(|(_, status)| *status)));
            }
            tokens.push(res::AnnotatedToken {
                text: token.text.clone(),
                is_word: token.is_word,
                term_id: term.map(|(id, _)| *id),
                status: term.map(|(_, status)| *status),
            });
        }
        sentences.push(res::AnnotatedSentence {
            sentence_index,
            translation: translations.get(&sentence_index).cloned(),
            tokens,
        });
    }

    Ok(res::TextDetails {
        id: text.id,
        title: text.title,
        right_to_left: profile.profile().right_to_left,
        sentences,
        coverage,
        audio_anchors: text
            .audio_anchors
            .into_iter()
            .flatten()
            .map(Into::into)
            .collect(),
    })
}

/// Deletes a standalone text and everything referencing it.
pub fn delete(state: &LexioState, user_id: i32, text_id: i32) -> EngineResult<()> {
    use crate::schema::{
        listening_progress as lp, sentence_translations as st, term_occurrences as to, texts as t,
    };
    tracing::info!("Deleting text {text_id}");

    let mut conn = state.pool.get()?;
    let text = queries::owned_text(&mut conn, user_id, text_id)?;
    if text.book_id.is_some() {
        return Err(EngineError::validation(
            "texts that belong to a book are deleted with the book",
        ));
    }
    conn.transaction(move |conn| {
        diesel::delete(to::table.filter(to::text_id.eq(text_id))).execute(conn)?;
        diesel::delete(st::table.filter(st::text_id.eq(text_id))).execute(conn)?;
        diesel::delete(lp::table.filter(lp::text_id.eq(text_id))).execute(conn)?;
        diesel::delete(t::table.filter(t::id.eq(text_id).and(t::user_id.eq(user_id))))
            .execute(conn)?;
        EngineResult::Ok(())
    })?;

    Ok(())
}
