//! Seeds the database with a default set of language profiles.

use eyre::WrapErr;
use lexio_api::request as req;
use lexio_engine::domain::profiles;
use std::{borrow::Cow, env};

pub fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt::init();
    dotenvy::dotenv().ok();

    let database_url = env::var("DATABASE_URL").wrap_err("Missing DATABASE_URL")?;
    let state = lexio_engine::state_from_vars(&database_url)?;
    for profile in default_profiles() {
        let code = profile.code.clone();
        let id = profiles::upsert(&state, profile)?;
        tracing::info!("Seeded language {code} with id {id}");
    }

    Ok(())
}

fn default_profiles() -> Vec<req::NewLanguageProfile<'static>> {
    vec![
        profile(
            "en",
            "English",
            "a-zA-Z'",
            ".!?",
            &["Dr", "Mr", "Mrs", "Ms", "Prof", "Sr", "Jr", "St", "vs"],
            false,
        ),
        profile(
            "fi",
            "Finnish",
            "a-zA-ZåäöÅÄÖ",
            ".!?",
            &["esim", "mm", "ns"],
            false,
        ),
        profile(
            "fr",
            "French",
            "a-zA-ZÀ-ÖØ-öø-ÿ'",
            ".!?",
            &["M", "Dr"],
            false,
        ),
        profile(
            "de",
            "German",
            "a-zA-ZÀ-ÖØ-öø-ÿ",
            ".!?",
            &["Dr", "Nr", "ca", "bzw"],
            false,
        ),
        profile(
            "es",
            "Spanish",
            "a-zA-ZÀ-ÖØ-öø-ÿ",
            ".!?",
            &["Sr", "Sra", "Dr", "Dra"],
            false,
        ),
        profile("ar", "Arabic", "\u{0600}-\u{06FF}", ".!?\u{061F}", &[], true),
    ]
}

fn profile(
    code: &'static str,
    name: &'static str,
    word_characters: &'static str,
    sentence_delimiters: &'static str,
    split_exceptions: &[&'static str],
    right_to_left: bool,
) -> req::NewLanguageProfile<'static> {
    req::NewLanguageProfile {
        code: Cow::Borrowed(code),
        name: Cow::Borrowed(name),
        word_characters: Cow::Borrowed(word_characters),
        sentence_delimiters: Cow::Borrowed(sentence_delimiters),
        split_exceptions: split_exceptions.iter().copied().map(Cow::Borrowed).collect(),
        substitutions: typography_substitutions(),
        right_to_left,
    }
}

/// Replacements that map typographic punctuation onto the plain characters
/// the profiles' character classes and delimiters are written with.
fn typography_substitutions() -> Vec<req::NewSubstitution<'static>> {
    [
        ("\u{2019}", "'"),
        ("\u{2018}", "'"),
        ("\u{201C}", "\""),
        ("\u{201D}", "\""),
        ("\u{2026}", "..."),
    ]
    .into_iter()
    .map(|(pattern, replacement)| req::NewSubstitution {
        pattern: Cow::Borrowed(pattern),
        replacement: Cow::Borrowed(replacement),
    })
    .collect()
}
