//! Reading and listening progress, and the per-language counters they feed.

use crate::{
    error::{EngineError, EngineResult},
    queries, query,
};
use chrono::Utc;
use diesel::prelude::*;
use lexio_api::response as res;

/// Moves the user's position in a book to the given text.
///
/// The first call for a book creates its progress marker; later calls
/// overwrite it. Advancing in a finished book does not unfinish it.
pub fn advance(
    conn: &mut PgConnection,
    user_id: i32,
    book_id: i32,
    text_id: i32,
) -> EngineResult<()> {
    use crate::schema::{books as b, reading_progress as rp, texts as t};
    tracing::info!("Advancing book {book_id} to text {text_id}");

    queries::owned_book(conn, user_id, book_id)?;
    let part = t::table
        .select(t::id)
        .filter(t::id.eq(text_id).and(t::book_id.eq(book_id)))
        .get_result::<i32>(conn)
        .optional()?;
    if part.is_none() {
        return Err(EngineError::validation(format!(
            "text {text_id} does not belong to book {book_id}"
        )));
    }
    conn.transaction(move |conn| {
        diesel::insert_into(rp::table)
            .values((
                rp::user_id.eq(user_id),
                rp::book_id.eq(book_id),
                rp::current_text_id.eq(text_id),
            ))
            .on_conflict((rp::user_id, rp::book_id))
            .do_update()
            .set((
                rp::current_text_id.eq(text_id),
                rp::updated_at.eq(Utc::now()),
            ))
            .execute(conn)?;
        diesel::update(b::table.filter(b::id.eq(book_id)))
            .set(b::last_read_text_id.eq(text_id))
            .execute(conn)?;
        EngineResult::Ok(())
    })?;

    Ok(())
}

/// Marks a book as finished.
///
/// The books-completed counter is incremented only when the flag actually
/// flips, so finishing an already finished book changes nothing.
pub fn finish_book(conn: &mut PgConnection, user_id: i32, book_id: i32) -> EngineResult<()> {
    use crate::schema::{books as b, language_statistics as ls};
    tracing::info!("Finishing book {book_id}");

    let book = queries::owned_book(conn, user_id, book_id)?;
    if book.is_finished {
        return Ok(());
    }
    conn.transaction(move |conn| {
        let updated = diesel::update(b::table.filter(b::id.eq(book_id).and(b::is_finished.eq(false))))
            .set(b::is_finished.eq(true))
            .execute(conn)?;
        if updated == 1 {
            diesel::insert_into(ls::table)
                .values((
                    ls::user_id.eq(user_id),
                    ls::language_id.eq(book.language_id),
                    ls::total_books_completed.eq(1),
                ))
                .on_conflict((ls::user_id, ls::language_id))
                .do_update()
                .set(ls::total_books_completed.eq(ls::total_books_completed + 1))
                .execute(conn)?;
        }
        EngineResult::Ok(())
    })?;

    Ok(())
}

/// Rolls a completed text into the language's counters.
///
/// Each call counts: deduplicating repeat completions within a reading
/// session is up to the caller.
pub fn complete_text(conn: &mut PgConnection, user_id: i32, text_id: i32) -> EngineResult<()> {
    use crate::schema::language_statistics as ls;
    tracing::info!("Completing text {text_id}");

    let text = queries::owned_text(conn, user_id, text_id)?;
    let words = i64::from(text.word_count);
    diesel::insert_into(ls::table)
        .values((
            ls::user_id.eq(user_id),
            ls::language_id.eq(text.language_id),
            ls::total_words_read.eq(words),
            ls::total_texts_completed.eq(1),
        ))
        .on_conflict((ls::user_id, ls::language_id))
        .do_update()
        .set((
            ls::total_words_read.eq(ls::total_words_read + words),
            ls::total_texts_completed.eq(ls::total_texts_completed + 1),
        ))
        .execute(conn)?;

    Ok(())
}

/// Saves the playback position of an audio lesson and adds the newly
/// listened seconds to the language's counters.
pub fn record_listening(
    conn: &mut PgConnection,
    user_id: i32,
    text_id: i32,
    position_seconds: f64,
    listened_seconds: i64,
) -> EngineResult<()> {
    use crate::schema::{language_statistics as ls, listening_progress as lp};
    tracing::info!("Recording listening for text {text_id}");

    if position_seconds < 0.0 {
        return Err(EngineError::validation(
            "listening position must not be negative",
        ));
    }
    if listened_seconds < 0 {
        return Err(EngineError::validation(
            "listened seconds must not be negative",
        ));
    }
    let text = queries::owned_text(conn, user_id, text_id)?;
    conn.transaction(move |conn| {
        diesel::insert_into(lp::table)
            .values((
                lp::user_id.eq(user_id),
                lp::text_id.eq(text_id),
                lp::position_seconds.eq(position_seconds),
            ))
            .on_conflict((lp::user_id, lp::text_id))
            .do_update()
            .set((
                lp::position_seconds.eq(position_seconds),
                lp::updated_at.eq(Utc::now()),
            ))
            .execute(conn)?;
        diesel::insert_into(ls::table)
            .values((
                ls::user_id.eq(user_id),
                ls::language_id.eq(text.language_id),
                ls::total_seconds_listened.eq(listened_seconds),
            ))
            .on_conflict((ls::user_id, ls::language_id))
            .do_update()
            .set(ls::total_seconds_listened.eq(ls::total_seconds_listened + listened_seconds))
            .execute(conn)?;
        EngineResult::Ok(())
    })?;

    Ok(())
}

query! {
    struct StatisticsRow {
        total_words_read: i64 = language_statistics::total_words_read,
        total_texts_completed: i32 = language_statistics::total_texts_completed,
        total_books_completed: i32 = language_statistics::total_books_completed,
        total_seconds_listened: i64 = language_statistics::total_seconds_listened,
    }
}

/// Gets the user's counters for a language. Users that have read nothing
/// yet get all zeroes.
pub fn statistics(
    conn: &mut PgConnection,
    user_id: i32,
    language_id: i32,
) -> EngineResult<res::LanguageStatistics> {
    use crate::schema::language_statistics as ls;
    tracing::info!("Fetching language statistics");

    let row = ls::table
        .select(StatisticsRow::as_select())
        .filter(ls::user_id.eq(user_id).and(ls::language_id.eq(language_id)))
        .get_result(conn)
        .optional()?;
    let statistics = match row {
        Some(row) => res::LanguageStatistics {
            total_words_read: row.total_words_read,
            total_texts_completed: row.total_texts_completed,
            total_books_completed: row.total_books_completed,
            total_seconds_listened: row.total_seconds_listened,
        },
        None => res::LanguageStatistics {
            total_words_read: 0,
            total_texts_completed: 0,
            total_books_completed: 0,
            total_seconds_listened: 0,
        },
    };

    Ok(statistics)
}
