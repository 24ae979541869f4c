//! The engine's error type.

use thiserror::Error;

pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid language profile: {0}")]
    Configuration(#[from] lexio::profile::ProfileError),
    #[error("{0}")]
    Validation(String),
    #[error("{what} {key} not found")]
    NotFound { what: &'static str, key: String },
    #[error(transparent)]
    Database(#[from] diesel::result::Error),
    #[error(transparent)]
    Pool(#[from] diesel::r2d2::PoolError),
}

impl EngineError {
    pub fn validation(message: impl ToString) -> Self {
        Self::Validation(message.to_string())
    }

    pub fn not_found(what: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            what,
            key: key.to_string(),
        }
    }
}

impl From<lexio::segmenter::SegmentError> for EngineError {
    fn from(value: lexio::segmenter::SegmentError) -> Self {
        Self::Validation(value.to_string())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn not_found_names_the_entity() {
        let err = EngineError::not_found("text", 7);
        assert_eq!(err.to_string(), "text 7 not found");
    }

    #[test]
    fn segment_errors_become_validation_errors() {
        let err = EngineError::from(lexio::segmenter::SegmentError::InvalidMaxSize);
        assert!(matches!(err, EngineError::Validation(_)));
    }
}
