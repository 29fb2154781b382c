//! Domain error types
//!
//! Every validating factory and mutating operation returns
//! [`DomainResult`]. Expected failures are values, never panics; the only
//! permitted abnormal abort is programmer misuse of the `Result` itself
//! (e.g. `unwrap()` on the wrong arm).

use thiserror::Error;

/// Errors produced by the domain core.
///
/// Exactly two kinds exist. Both carry a human-readable message naming the
/// invariant that failed; collaborators map them to transport responses.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An invariant on the supplied data failed (empty name, window
    /// ending before it starts, non-positive review period, ...).
    #[error("{0}")]
    Validation(String),

    /// A domain rule was violated (linking evidence already linked,
    /// reviewing evidence twice, reopening pending evidence, ...).
    #[error("{0}")]
    RuleViolation(String),
}

impl DomainError {
    /// Build a validation failure from any displayable message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Build a rule violation from any displayable message.
    pub fn rule(message: impl Into<String>) -> Self {
        Self::RuleViolation(message.into())
    }
}

/// Result alias used by every fallible domain operation.
pub type DomainResult<T> = Result<T, DomainError>;
