//! Sentence translations, stored per text and joined to sentences by index.

use crate::{
    error::{EngineError, EngineResult},
    queries,
    utils::diesel::PostgresChunks,
};
use chrono::Utc;
use diesel::prelude::*;
use lexio_api::request as req;
use std::collections::BTreeMap;

/// Upserts a batch of sentence translations for a text.
///
/// The batch comes from a translation provider already aligned by sentence
/// index. Indexes past the end of the text are stored as-is so translations
/// survive small edits to the profile that shift sentence boundaries. Within
/// one batch the last entry for an index wins.
pub fn set(
    conn: &mut PgConnection,
    user_id: i32,
    text_id: i32,
    translations: Vec<req::TranslatedSentence<'_>>,
) -> EngineResult<()> {
    use crate::schema::sentence_translations as st;
    tracing::info!("Storing translations for text {text_id}");

    if translations.iter().any(|t| t.sentence_index < 0) {
        return Err(EngineError::validation(
            "sentence index must not be negative",
        ));
    }
    queries::owned_text(conn, user_id, text_id)?;
    let values = dedupe_keep_last(translations)
        .into_iter()
        .map(|(sentence_index, translation)| {
            (
                st::text_id.eq(text_id),
                st::sentence_index.eq(sentence_index),
                st::translation.eq(translation),
            )
        })
        .collect::<Vec<_>>();
    for chunk in values.pg_chunks() {
        diesel::insert_into(st::table)
            .values(chunk)
            .on_conflict((st::text_id, st::sentence_index))
            .do_update()
            .set((
                st::translation.eq(diesel::upsert::excluded(st::translation)),
                st::updated_at.eq(Utc::now()),
            ))
            .execute(conn)?;
    }

    Ok(())
}

/// Postgres rejects a multi-row upsert that touches one row twice, so repeated
/// indexes collapse to the last entry before insertion.
fn dedupe_keep_last(translations: Vec<req::TranslatedSentence<'_>>) -> Vec<(i32, String)> {
    let mut by_index = BTreeMap::new();
    for t in translations {
        by_index.insert(t.sentence_index, t.translation.into_owned());
    }
    by_index.into_iter().collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use std::borrow::Cow;

    #[test]
    fn repeated_indexes_keep_the_last_translation() {
        let translations = vec![
            req::TranslatedSentence {
                sentence_index: 0,
                translation: Cow::Borrowed("first try"),
            },
            req::TranslatedSentence {
                sentence_index: 1,
                translation: Cow::Borrowed("second"),
            },
            req::TranslatedSentence {
                sentence_index: 0,
                translation: Cow::Borrowed("revised"),
            },
        ];
        assert_eq!(
            dedupe_keep_last(translations),
            vec![(0, "revised".to_string()), (1, "second".to_string())]
        );
    }
}
