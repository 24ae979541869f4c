//! Generic utilities.

pub mod database;
pub mod diesel;
