//! Application error types

use dashvar_domain::DomainError;
use thiserror::Error;

/// Application-level errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// A format with the same identifier is already registered.
    #[error("format already registered: {0}")]
    DuplicateFormat(String),

    /// No format is registered under the identifier.
    #[error("unknown format: {0}")]
    UnknownFormat(String),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
