//! Recomputes the cached word counters of every book.
//!
//! Useful after changing term statuses in bulk, for example after importing
//! vocabulary from another tool.

use diesel::prelude::*;
use eyre::WrapErr;
use lexio_engine::domain::coverage;
use std::env;

pub fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt::init();
    dotenvy::dotenv().ok();

    let database_url = env::var("DATABASE_URL").wrap_err("Missing DATABASE_URL")?;
    let state = lexio_engine::state_from_vars(&database_url)?;

    use lexio_engine::schema::books as b;
    let mut conn = state.pool.get()?;
    let books = b::table
        .select((b::user_id, b::id))
        .get_results::<(i32, i32)>(&mut conn)?;
    drop(conn);

    tracing::info!("Refreshing the counters of {} books", books.len());
    for (user_id, book_id) in books {
        let coverage = coverage::book_coverage(&state, user_id, book_id)?;
        tracing::info!(
            "Book {book_id}: {} of {} words known",
            coverage.known_words,
            coverage.total_words
        );
    }

    Ok(())
}
