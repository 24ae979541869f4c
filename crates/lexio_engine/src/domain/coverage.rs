//! Coverage queries over stored texts and books.

use crate::{domain::profiles, error::EngineResult, queries, LexioState};
use diesel::prelude::*;
use lexio::{coverage::Coverage, tokenizer};

/// Computes the coverage of one text against the user's current term statuses.
pub fn text_coverage(state: &LexioState, user_id: i32, text_id: i32) -> EngineResult<Coverage> {
    tracing::info!("Computing coverage for text {text_id}");

    let mut conn = state.pool.get()?;
    let text = queries::owned_text(&mut conn, user_id, text_id)?;
    let profile = profiles::compiled(state, text.language_id)?;
    let statuses = queries::term_statuses(&mut conn, user_id, text.language_id)?;
    let tokenized = tokenizer::tokenize(&text.content, &profile);

    Ok(lexio::coverage::compute(&tokenized, &statuses))
}

/// Recomputes the coverage of a book from the user's current term statuses
/// and refreshes the counters cached on the book row.
pub fn book_coverage(state: &LexioState, user_id: i32, book_id: i32) -> EngineResult<Coverage> {
    use crate::schema::{books as b, texts as t};
    tracing::info!("Computing coverage for book {book_id}");

    let mut conn = state.pool.get()?;
    let book = queries::owned_book(&mut conn, user_id, book_id)?;
    let profile = profiles::compiled(state, book.language_id)?;
    let statuses = queries::term_statuses(&mut conn, user_id, book.language_id)?;
    let contents = t::table
        .select(t::content)
        .filter(t::book_id.eq(book_id))
        .order(t::part_number.asc())
        .get_results::<String>(&mut conn)?;

    let mut coverage = Coverage::default();
    for content in &contents {
        let tokenized = tokenizer::tokenize(content, &profile);
        coverage = coverage.merge(lexio::coverage::compute(&tokenized, &statuses));
    }
    diesel::update(b::table.filter(b::id.eq(book_id)))
        .set((
            b::total_words.eq(coverage.total_words),
            b::known_words.eq(coverage.known_words),
            b::learning_words.eq(coverage.learning_words),
        ))
        .execute(&mut conn)?;

    Ok(coverage)
}
