//! Functions and types dealing with data specific to lexio's problem domain.

pub mod books;
pub mod coverage;
pub mod profiles;
pub mod progress;
pub mod texts;
pub mod translations;
pub mod vocabulary;
