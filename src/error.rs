//! Error types for razbor.

use thiserror::Error;

/// Result type for razbor operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for razbor operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// CoNLL input could not be parsed.
    #[error("CoNLL parse error at line {line}: {message}")]
    Conll {
        /// 1-based line number in the input.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Boundary classification failed or returned a malformed decision
    /// vector.
    #[error("Classifier error: {0}")]
    Classifier(String),

    /// Ruleset definition is malformed.
    #[error("Ruleset error: {0}")]
    Ruleset(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a CoNLL parse error.
    pub fn conll(line: usize, message: impl Into<String>) -> Self {
        Error::Conll {
            line,
            message: message.into(),
        }
    }

    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Create a classifier error.
    pub fn classifier(msg: impl Into<String>) -> Self {
        Error::Classifier(msg.into())
    }

    /// Create a ruleset error.
    pub fn ruleset(msg: impl Into<String>) -> Self {
        Error::Ruleset(msg.into())
    }
}
