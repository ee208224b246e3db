//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Three outcomes are distinguished: the caller sent something it can fix,
/// the caller asked for something that does not exist, or the service itself
/// failed in a way the caller cannot do anything about.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input failed validation (client-correctable).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Unexpected internal failure (e.g. poisoned state).
    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
