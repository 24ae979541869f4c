//! Types for communication between the lexio engine and its callers.

pub mod request;
pub mod response;
