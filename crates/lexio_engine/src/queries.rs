//! Reusable database query functions.

use crate::{
    eq,
    error::{EngineError, EngineResult},
    query,
};
use diesel::prelude::*;
use std::collections::HashMap;

/// Maps the user's normalized terms to their statuses for one language.
pub fn term_statuses(
    conn: &mut PgConnection,
    user_id: i32,
    language_id: i32,
) -> EngineResult<HashMap<String, i32>> {
    use crate::schema::terms as t;

    let statuses = t::table
        .select((t::term, t::status))
        .filter(eq!(t, user_id).and(eq!(t, language_id)))
        .get_results::<(String, i32)>(conn)?
        .into_iter()
        .collect::<HashMap<_, _>>();

    Ok(statuses)
}

query! {
    pub struct TextRecord {
        pub id: i32 = texts::id,
        pub language_id: i32 = texts::language_id,
        pub book_id: Option<i32> = texts::book_id,
        pub content: String = texts::content,
        pub word_count: i32 = texts::word_count,
    }
}

/// Fetches a text owned by the user.
pub fn owned_text(
    conn: &mut PgConnection,
    user_id: i32,
    text_id: i32,
) -> EngineResult<TextRecord> {
    use crate::schema::texts as t;

    t::table
        .select(TextRecord::as_select())
        .filter(t::id.eq(text_id).and(t::user_id.eq(user_id)))
        .get_result(conn)
        .optional()?
        .ok_or_else(|| EngineError::not_found("text", text_id))
}

query! {
    pub struct BookRecord {
        pub id: i32 = books::id,
        pub language_id: i32 = books::language_id,
        pub title: String = books::title,
        pub last_read_text_id: Option<i32> = books::last_read_text_id,
        pub is_finished: bool = books::is_finished,
    }
}

/// Fetches a book owned by the user.
pub fn owned_book(
    conn: &mut PgConnection,
    user_id: i32,
    book_id: i32,
) -> EngineResult<BookRecord> {
    use crate::schema::books as b;

    b::table
        .select(BookRecord::as_select())
        .filter(b::id.eq(book_id).and(b::user_id.eq(user_id)))
        .get_result(conn)
        .optional()?
        .ok_or_else(|| EngineError::not_found("book", book_id))
}
