//! Intake error types

use attest_domain::DomainError;
use thiserror::Error;

/// Errors that can occur while turning payloads into aggregates
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntakeError {
    /// A closed-enumeration field carried a value outside its set
    #[error("Unknown {field} value: '{value}'")]
    UnknownValue {
        /// The payload field that failed
        field: &'static str,
        /// The offending value
        value: String,
    },

    /// The domain core rejected the validated payload
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl IntakeError {
    pub(crate) fn unknown(field: &'static str, value: &str) -> Self {
        Self::UnknownValue {
            field,
            value: value.to_string(),
        }
    }
}
