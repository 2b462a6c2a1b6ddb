//! Error types for gtask.
//!
//! [`ParseError`] covers everything the argument interpreter can reject.
//! [`Error`] is the application-level error returned by commands, storage
//! and configuration.

use thiserror::Error;

/// Errors raised while interpreting task arguments and time expressions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// An unrecognized character or malformed am/pm marker.
    #[error("{message}: {input}")]
    Lex {
        /// The violated rule.
        message: &'static str,
        /// The offending time expression.
        input: String,
    },

    /// A token appears where the grammar does not allow it.
    #[error("{message}: {input}")]
    Syntax {
        /// The violated rule.
        message: &'static str,
        /// The offending token or time expression.
        input: String,
    },

    /// An hour or minute outside its valid range.
    #[error("{message}: {input}")]
    Range {
        /// The violated bound.
        message: &'static str,
        /// The offending time expression.
        input: String,
    },

    /// Well-formed input with an invalid meaning.
    #[error("{0}")]
    Semantic(String),

    /// A date token matching neither a keyword nor an accepted format.
    #[error("invalid date format: {0}")]
    Format(String),
}

impl ParseError {
    pub(crate) fn lex(message: &'static str, input: &str) -> Self {
        Self::Lex {
            message,
            input: input.to_string(),
        }
    }

    pub(crate) fn syntax(message: &'static str, input: &str) -> Self {
        Self::Syntax {
            message,
            input: input.to_string(),
        }
    }

    pub(crate) fn range(message: &'static str, input: &str) -> Self {
        Self::Range {
            message,
            input: input.to_string(),
        }
    }

    pub(crate) fn semantic(message: impl Into<String>) -> Self {
        Self::Semantic(message.into())
    }
}

/// Application-level errors.
#[derive(Debug, Error)]
pub enum Error {
    /// The command arguments could not be interpreted.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// Configuration could not be read or written.
    #[error("config error: {0}")]
    Config(String),

    /// No task exists with the given id.
    #[error("task {0} not found")]
    NotFound(i64),

    /// Parsed input the command layer refuses.
    #[error("{0}")]
    InvalidInput(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(e: rusqlite::Error) -> Self {
        Self::Database(e.to_string())
    }
}
