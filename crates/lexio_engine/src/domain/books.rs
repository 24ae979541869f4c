//! Functions and types related to books.

use crate::{
    domain::{profiles, texts::Text},
    error::{EngineError, EngineResult},
    queries, query,
    utils::diesel::PostgresChunks,
    LexioState,
};
use diesel::prelude::*;
use lexio::{coverage::Coverage, segmenter, tokenizer};
use lexio_api::{request as req, response as res};

/// Segments a document without storing anything, for previewing an import.
pub fn segment_preview(
    state: &LexioState,
    language_code: &str,
    segment: req::SegmentDocument<'_>,
) -> EngineResult<Vec<String>> {
    let req::SegmentDocument {
        document,
        split_method,
        max_segment_size,
    } = segment;
    let profile = profiles::compiled_by_code(state, language_code)?;
    // negative sizes fall through to the zero check in the segmenter
    let max_size = usize::try_from(max_segment_size).unwrap_or(0);
    let segments = segmenter::segment(&document, &profile, split_method, max_size)?;
    Ok(segments)
}

/// Segments a book into parts and inserts the book with one text per part
/// in one transaction. The book's word counters are derived from the user's
/// current term statuses.
pub fn insert(state: &LexioState, user_id: i32, new_book: req::NewBook<'_>) -> EngineResult<i32> {
    use crate::schema::{books as b, texts as t};
    tracing::info!("Inserting book");

    let req::NewBook {
        language_id,
        title,
        content,
        split_method,
        max_segment_size,
    } = new_book;
    if content.trim().is_empty() {
        return Err(EngineError::validation("book content must not be empty"));
    }
    let profile = profiles::compiled(state, language_id)?;
    let max_size = usize::try_from(max_segment_size).unwrap_or(0);
    let segments = segmenter::segment(&content, &profile, split_method, max_size)?;

    let mut conn = state.pool.get()?;
    let statuses = queries::term_statuses(&mut conn, user_id, language_id)?;
    let mut coverage = Coverage::default();
    let mut parts = Vec::with_capacity(segments.len());
    for segment in segments {
        let tokenized = tokenizer::tokenize(&segment, &profile);
        coverage = coverage.merge(lexio::coverage::compute(&tokenized, &statuses));
        let word_count = tokenized.word_count() as i32;
        parts.push((segment, word_count));
    }

    let id = conn.transaction(move |conn| {
        let book_id = diesel::insert_into(b::table)
            .values((
                b::user_id.eq(user_id),
                b::language_id.eq(language_id),
                b::title.eq(title.as_ref()),
                b::total_words.eq(coverage.total_words),
                b::known_words.eq(coverage.known_words),
                b::learning_words.eq(coverage.learning_words),
            ))
            .returning(b::id)
            .get_result::<i32>(conn)?;
        let part_count = parts.len();
        let values = parts
            .into_iter()
            .enumerate()
            .map(|(idx, (content, word_count))| {
                let part_number = idx as i32 + 1;
                (
                    t::user_id.eq(user_id),
                    t::language_id.eq(language_id),
                    t::book_id.eq(book_id),
                    t::part_number.eq(part_number),
                    t::title.eq(format!("{title} ({part_number}/{part_count})")),
                    t::content.eq(content),
                    t::word_count.eq(word_count),
                )
            })
            .collect::<Vec<_>>();
        for chunk in values.pg_chunks() {
            diesel::insert_into(t::table).values(chunk).execute(conn)?;
        }
        EngineResult::Ok(book_id)
    })?;

    Ok(id)
}

query! {
    pub struct Book {
        pub id: i32 = books::id,
        pub title: String = books::title,
        pub total_words: i32 = books::total_words,
        pub known_words: i32 = books::known_words,
        pub learning_words: i32 = books::learning_words,
        pub is_finished: bool = books::is_finished,
    }
}

impl From<Book> for res::Book {
    fn from(value: Book) -> Self {
        res::Book {
            id: value.id,
            title: value.title,
            total_words: value.total_words,
            known_words: value.known_words,
            learning_words: value.learning_words,
            is_finished: value.is_finished,
        }
    }
}

/// Gets the user's books for a language, newest first.
pub fn get_all(
    state: &LexioState,
    user_id: i32,
    language_id: i32,
) -> EngineResult<Vec<res::Book>> {
    use crate::schema::books as b;
    tracing::info!("Fetching books");

    let mut conn = state.pool.get()?;
    let books = b::table
        .select(Book::as_select())
        .filter(b::user_id.eq(user_id).and(b::language_id.eq(language_id)))
        .order(b::created_at.desc())
        .get_results(&mut conn)?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(books)
}

query! {
    struct BookPage {
        id: i32 = books::id,
        title: String = books::title,
        total_words: i32 = books::total_words,
        known_words: i32 = books::known_words,
        learning_words: i32 = books::learning_words,
        last_read_text_id: Option<i32> = books::last_read_text_id,
        is_finished: bool = books::is_finished,
    }
}

/// Gets one book with its parts in reading order and its cached coverage.
pub fn get_one(state: &LexioState, user_id: i32, book_id: i32) -> EngineResult<res::BookDetails> {
    use crate::schema::{books as b, texts as t};
    tracing::info!("Fetching book {book_id}");

    let mut conn = state.pool.get()?;
    let book = b::table
        .select(BookPage::as_select())
        .filter(b::id.eq(book_id).and(b::user_id.eq(user_id)))
        .get_result(&mut conn)
        .optional()?
        .ok_or_else(|| EngineError::not_found("book", book_id))?;
    let parts = t::table
        .select(Text::as_select())
        .filter(t::book_id.eq(book_id))
        .order(t::part_number.asc())
        .get_results(&mut conn)?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(res::BookDetails {
        id: book.id,
        title: book.title,
        parts,
        coverage: Coverage {
            total_words: book.total_words,
            known_words: book.known_words,
            learning_words: book.learning_words,
            new_words: book.total_words - book.known_words - book.learning_words,
        },
        last_read_text_id: book.last_read_text_id,
        is_finished: book.is_finished,
    })
}

/// Deletes a book, its texts and everything referencing them.
pub fn delete(state: &LexioState, user_id: i32, book_id: i32) -> EngineResult<()> {
    use crate::schema::{
        books as b, listening_progress as lp, reading_progress as rp, sentence_translations as st,
        term_occurrences as to, texts as t,
    };
    tracing::info!("Deleting book {book_id}");

    let mut conn = state.pool.get()?;
    queries::owned_book(&mut conn, user_id, book_id)?;
    conn.transaction(move |conn| {
        let text_ids = t::table
            .select(t::id)
            .filter(t::book_id.eq(book_id))
            .get_results::<i32>(conn)?;
        diesel::delete(to::table.filter(to::text_id.eq_any(&text_ids))).execute(conn)?;
        diesel::delete(st::table.filter(st::text_id.eq_any(&text_ids))).execute(conn)?;
        diesel::delete(lp::table.filter(lp::text_id.eq_any(&text_ids))).execute(conn)?;
        diesel::delete(rp::table.filter(rp::book_id.eq(book_id))).execute(conn)?;
        diesel::delete(t::table.filter(t::book_id.eq(book_id))).execute(conn)?;
        diesel::delete(b::table.filter(b::id.eq(book_id).and(b::user_id.eq(user_id))))
            .execute(conn)?;
        EngineResult::Ok(())
    })?;

    Ok(())
}
