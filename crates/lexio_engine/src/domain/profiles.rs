//! Functions and types related to language profiles.

use crate::{
    error::{EngineError, EngineResult},
    query,
    utils::database,
    LexioState,
};
use diesel::{prelude::*, upsert::excluded};
use lexio::profile::{CompiledProfile, LanguageProfile};
use lexio_api::{request as req, response as res};
use std::sync::Arc;

query! {
    pub struct Language {
        pub id: i32 = languages::id,
        pub code: String = languages::code,
        pub name: String = languages::name,
        pub word_characters: String = languages::word_characters,
        pub sentence_delimiters: String = languages::sentence_delimiters,
        pub split_exceptions: Vec<Option<String>> = languages::split_exceptions,
        pub substitutions: Vec<Option<database::Substitution>> = languages::substitutions,
        pub right_to_left: bool = languages::right_to_left,
    }
}

impl Language {
    fn into_profile(self) -> LanguageProfile {
        LanguageProfile {
            code: self.code,
            name: self.name,
            word_characters: self.word_characters,
            sentence_delimiters: self.sentence_delimiters,
            split_exceptions: self.split_exceptions.into_iter().flatten().collect(),
            substitutions: self
                .substitutions
                .into_iter()
                .flatten()
                .map(Into::into)
                .collect(),
            right_to_left: self.right_to_left,
        }
    }
}

impl From<Language> for res::LanguageProfile {
    fn from(value: Language) -> Self {
        res::LanguageProfile {
            id: value.id,
            code: value.code,
            name: value.name,
            word_characters: value.word_characters,
            sentence_delimiters: value.sentence_delimiters,
            split_exceptions: value.split_exceptions.into_iter().flatten().collect(),
            substitutions: value
                .substitutions
                .into_iter()
                .flatten()
                .map(|s| res::Substitution {
                    pattern: s.pattern,
                    replacement: s.replacement,
                })
                .collect(),
            right_to_left: value.right_to_left,
        }
    }
}

/// Gets the stored profile for the given language code.
pub fn get_by_code(state: &LexioState, code: &str) -> EngineResult<res::LanguageProfile> {
    use crate::schema::languages as l;
    tracing::info!("Fetching language profile {code}");

    let mut conn = state.pool.get()?;
    let language = l::table
        .select(Language::as_select())
        .filter(l::code.eq(code))
        .get_result(&mut conn)
        .optional()?
        .ok_or_else(|| EngineError::not_found("language", code))?;

    Ok(language.into())
}

/// Gets the compiled profile for the given language id, compiling
/// and caching it if needed.
pub fn compiled(state: &LexioState, language_id: i32) -> EngineResult<Arc<CompiledProfile>> {
    use crate::schema::languages as l;

    let mut conn = state.pool.get()?;
    let language = l::table
        .select(Language::as_select())
        .filter(l::id.eq(language_id))
        .get_result(&mut conn)
        .optional()?
        .ok_or_else(|| EngineError::not_found("language", language_id))?;
    if let Some(compiled) = state.profile_cache.get(&language.code) {
        return Ok(compiled);
    }
    compile_into_cache(state, language.into_profile())
}

/// Gets the compiled profile for the given language code, compiling
/// and caching it if needed.
pub fn compiled_by_code(state: &LexioState, code: &str) -> EngineResult<Arc<CompiledProfile>> {
    use crate::schema::languages as l;

    if let Some(compiled) = state.profile_cache.get(code) {
        return Ok(compiled);
    }
    let mut conn = state.pool.get()?;
    let language = l::table
        .select(Language::as_select())
        .filter(l::code.eq(code))
        .get_result(&mut conn)
        .optional()?
        .ok_or_else(|| EngineError::not_found("language", code))?;
    compile_into_cache(state, language.into_profile())
}

fn compile_into_cache(
    state: &LexioState,
    profile: LanguageProfile,
) -> EngineResult<Arc<CompiledProfile>> {
    let compiled = Arc::new(profile.compile()?);
    state
        .profile_cache
        .insert(compiled.code().to_string(), compiled.clone());
    Ok(compiled)
}

/// Validates and stores a language profile, replacing any previous profile
/// with the same code.
///
/// A profile that does not compile is rejected before anything is written.
pub fn upsert(state: &LexioState, new_profile: req::NewLanguageProfile<'_>) -> EngineResult<i32> {
    use crate::schema::languages as l;
    tracing::info!("Upserting language profile {}", new_profile.code);

    let req::NewLanguageProfile {
        code,
        name,
        word_characters,
        sentence_delimiters,
        split_exceptions,
        substitutions,
        right_to_left,
    } = new_profile;
    let substitutions = substitutions
        .into_iter()
        .map(database::Substitution::from)
        .collect::<Vec<_>>();
    let profile = LanguageProfile {
        code: code.into_owned(),
        name: name.into_owned(),
        word_characters: word_characters.into_owned(),
        sentence_delimiters: sentence_delimiters.into_owned(),
        split_exceptions: split_exceptions.into_iter().map(|e| e.into_owned()).collect(),
        substitutions: substitutions.iter().cloned().map(Into::into).collect(),
        right_to_left,
    };
    let compiled = Arc::new(profile.clone().compile()?);
    let LanguageProfile {
        code,
        name,
        word_characters,
        sentence_delimiters,
        split_exceptions,
        right_to_left,
        ..
    } = profile;

    let mut conn = state.pool.get()?;
    let id = diesel::insert_into(l::table)
        .values((
            l::code.eq(&code),
            l::name.eq(name),
            l::word_characters.eq(word_characters),
            l::sentence_delimiters.eq(sentence_delimiters),
            l::split_exceptions.eq(split_exceptions),
            l::substitutions.eq(substitutions),
            l::right_to_left.eq(right_to_left),
        ))
        .on_conflict(l::code)
        .do_update()
        .set((
            l::name.eq(excluded(l::name)),
            l::word_characters.eq(excluded(l::word_characters)),
            l::sentence_delimiters.eq(excluded(l::sentence_delimiters)),
            l::split_exceptions.eq(excluded(l::split_exceptions)),
            l::substitutions.eq(excluded(l::substitutions)),
            l::right_to_left.eq(excluded(l::right_to_left)),
        ))
        .returning(l::id)
        .get_result::<i32>(&mut conn)?;
    // the freshly compiled profile replaces the cached one only after the write succeeds
    state.profile_cache.insert(code, compiled);

    Ok(id)
}
