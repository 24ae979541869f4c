//! Functions and types related to the user's term vocabulary.

use crate::{
    eq,
    error::{EngineError, EngineResult},
    queries, query,
    utils::diesel::{PostgresChunks, PG_MAX_PARAMS},
};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use lexio::coverage;
use lexio_api::{request as req, response as res};
use std::collections::HashSet;

/// Ensures a term exists for every normalized word and links each term to
/// the text the words occurred in.
///
/// The text must exist and belong to the user before anything is written.
/// Idempotent: terms and edges that already exist are left alone. Every
/// statement is idempotent on its own, so there is no wrapping transaction
/// and a failed call can be retried without undoing chunks that already
/// went through.
pub fn record_occurrences(
    conn: &mut PgConnection,
    user_id: i32,
    language_id: i32,
    text_id: i32,
    words: &[&str],
) -> EngineResult<()> {
    use crate::schema::term_occurrences as to;
    tracing::info!("Recording term occurrences for text {text_id}");

    queries::owned_text(conn, user_id, text_id)?;
    let normalized = words
        .iter()
        .map(|w| lexio::normalize_term(w))
        .collect::<HashSet<_>>()
        .into_iter()
        .collect::<Vec<_>>();
    let term_ids = get_or_create_terms(conn, user_id, language_id, &normalized)?;

    let occurrences = term_ids
        .into_iter()
        .map(|term_id| eq!(to, term_id, text_id))
        .collect::<Vec<_>>();
    for chunk in occurrences.pg_chunks() {
        diesel::insert_into(to::table)
            .values(chunk)
            .on_conflict((to::term_id, to::text_id))
            .do_nothing()
            .execute(conn)?;
    }

    Ok(())
}

/// Creates missing terms at the lowest status and returns the ids of all of
/// the given normalized terms.
///
/// A concurrent create of the same term resolves through the uniqueness
/// constraint on (user_id, language_id, term): the losing insert does
/// nothing and the select that follows picks up the surviving row.
pub fn get_or_create_terms(
    conn: &mut PgConnection,
    user_id: i32,
    language_id: i32,
    normalized_terms: &[String],
) -> EngineResult<Vec<i32>> {
    use crate::schema::terms as t;

    let status = coverage::MIN_STATUS;
    let new_terms = normalized_terms
        .iter()
        .map(|term| eq!(t, user_id, language_id, term, status))
        .collect::<Vec<_>>();
    for chunk in new_terms.pg_chunks() {
        diesel::insert_into(t::table)
            .values(chunk)
            .on_conflict((t::user_id, t::language_id, t::term))
            .do_nothing()
            .execute(conn)?;
    }

    let mut term_ids = Vec::with_capacity(normalized_terms.len());
    for chunk in normalized_terms.chunks(PG_MAX_PARAMS - 2) {
        let ids = t::table
            .select(t::id)
            .filter(
                t::user_id
                    .eq(user_id)
                    .and(t::language_id.eq(language_id))
                    .and(t::term.eq_any(chunk)),
            )
            .get_results::<i32>(conn)?;
        term_ids.extend(ids);
    }

    Ok(term_ids)
}

/// Sets the status of a term, optionally replacing its translation.
pub fn set_status(
    conn: &mut PgConnection,
    user_id: i32,
    term_id: i32,
    update: req::SetTermStatus<'_>,
) -> EngineResult<()> {
    use crate::schema::terms as t;

    let req::SetTermStatus {
        status,
        translation,
    } = update;
    tracing::info!("Setting term {term_id} to status {status}");

    if !coverage::valid_status(status) {
        return Err(EngineError::validation(format!(
            "term status must be between {} and {}, got {status}",
            coverage::MIN_STATUS,
            coverage::MAX_STATUS,
        )));
    }

    let target = t::table.filter(t::id.eq(term_id).and(t::user_id.eq(user_id)));
    let updated = match translation.as_deref() {
        Some(translation) => diesel::update(target)
            .set((t::status.eq(status), t::translation.eq(translation)))
            .execute(conn)?,
        None => diesel::update(target)
            .set(t::status.eq(status))
            .execute(conn)?,
    };
    if updated == 0 {
        return Err(EngineError::not_found("term", term_id));
    }

    Ok(())
}

query! {
    pub struct Term {
        pub id: i32 = terms::id,
        pub term: String = terms::term,
        pub status: i32 = terms::status,
        pub translation: Option<String> = terms::translation,
        pub created_at: DateTime<Utc> = terms::created_at,
    }
}

impl From<Term> for res::Term {
    fn from(value: Term) -> Self {
        res::Term {
            id: value.id,
            term: value.term,
            status: value.status,
            translation: value.translation,
            created_at: value.created_at,
        }
    }
}

/// Gets all of the user's terms for a language, newest first.
pub fn get_all(
    conn: &mut PgConnection,
    user_id: i32,
    language_id: i32,
) -> EngineResult<Vec<res::Term>> {
    use crate::schema::terms as t;
    tracing::info!("Fetching terms");

    let terms = t::table
        .select(Term::as_select())
        .filter(eq!(t, user_id).and(eq!(t, language_id)))
        .order(t::created_at.desc())
        .get_results(conn)?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(terms)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn status_update_deserializes_from_the_wire_form() {
        let update: req::SetTermStatus =
            serde_json::from_str(r#"{"status": 4, "translation": "bread"}"#).unwrap();
        assert_eq!(update.status, 4);
        assert_eq!(update.translation.as_deref(), Some("bread"));

        let update: req::SetTermStatus =
            serde_json::from_str(r#"{"status": 1, "translation": null}"#).unwrap();
        assert_eq!(update.status, 1);
        assert_eq!(update.translation, None);
    }
}
