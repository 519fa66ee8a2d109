//! Error types for line parsing

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors raised while resolving headers or parsing lines
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Header contains the same column name more than once
    #[error("Duplicate column entries found: {duplicates:?} in header {header:?}")]
    DuplicateColumn {
        header: Vec<String>,
        duplicates: Vec<String>,
    },

    /// Resolved column is not in the configured permissible set
    #[error("Column '{column}' is not permitted, expected one of {permitted:?}")]
    InvalidColumn {
        column: String,
        permitted: Vec<String>,
    },

    /// Caller used the parser out of protocol order
    #[error("Illegal parser state: {0}")]
    IllegalState(String),
}

impl ParseError {
    /// True for caller protocol violations, false for bad header data
    pub fn is_protocol_violation(&self) -> bool {
        matches!(self, ParseError::IllegalState(_))
    }
}
