use std::{num::ParseFloatError, sync::PoisonError};

use thiserror::Error;

/// Custom Result type for tinydb operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for tinydb
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Tokenizer/parser grammar violation
    #[error("syntax error: {0}")]
    Syntax(String),
    /// Nothing to tokenize
    #[error("query is empty or could not be tokenized")]
    EmptyQuery,
    /// Malformed WHERE fragment
    #[error("invalid condition: {0}")]
    InvalidCondition(String),
    #[error("table {0} already exists")]
    AlreadyExists(String),
    /// Unknown table, or unknown column on a row lookup
    #[error("{0} not found")]
    NotFound(String),
    /// Assignment to a column the row does not have
    #[error("unknown column {0}")]
    UnknownColumn(String),
    #[error("index {index} out of range for table of {len} rows")]
    IndexOutOfRange { index: usize, len: usize },
    /// A storage error raised while executing a statement
    #[error("failed to execute {operation}: {source}")]
    Execution {
        operation: &'static str,
        source: Box<Error>,
    },
    /// Internal error (lock poisoning and the like)
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Wraps a storage error with the name of the statement that raised it
    pub fn execution(operation: &'static str, source: Error) -> Self {
        Error::Execution {
            operation,
            source: Box::new(source),
        }
    }

    /// Returns the innermost error, stripping execution context
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::Execution { source, .. } => source.root_cause(),
            err => err,
        }
    }
}

impl From<ParseFloatError> for Error {
    fn from(value: ParseFloatError) -> Self {
        Error::InvalidCondition(value.to_string())
    }
}

impl<T> From<PoisonError<T>> for Error {
    fn from(value: PoisonError<T>) -> Self {
        Error::Internal(value.to_string())
    }
}

impl serde::Serialize for Error {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Error::Syntax("expected FROM, got users".into()).to_string(),
            "syntax error: expected FROM, got users"
        );
        assert_eq!(Error::NotFound("table users".into()).to_string(), "table users not found");
        assert_eq!(
            Error::IndexOutOfRange { index: 5, len: 2 }.to_string(),
            "index 5 out of range for table of 2 rows"
        );

        let err = Error::execution("UPDATE", Error::UnknownColumn("email".into()));
        assert_eq!(err.to_string(), "failed to execute UPDATE: unknown column email");
        assert_eq!(err.root_cause(), &Error::UnknownColumn("email".into()));
    }

    #[test]
    fn test_error_serialize() {
        let json = serde_json::to_string(&Error::EmptyQuery).unwrap();
        assert_eq!(json, "\"query is empty or could not be tokenized\"");
    }
}
