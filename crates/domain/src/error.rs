//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A variable name is empty or contains characters a placeholder cannot reference.
    #[error("invalid variable name: {0}")]
    InvalidVariableName(String),

    /// A field path could not be parsed.
    #[error("invalid field path: {0}")]
    InvalidFieldPath(String),

    /// A time range has its start after its end.
    #[error("invalid time range: {0}")]
    InvalidTimeRange(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
