//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Routing decision must contain at least one domain")]
    EmptyDecision,

    #[error("Unknown domain: {0}")]
    UnknownDomain(String),

    #[error("Invalid model: {0}")]
    InvalidModel(String),
}

impl DomainError {
    /// Check if this error came from an unrecognised domain name
    pub fn is_unknown_domain(&self) -> bool {
        matches!(self, DomainError::UnknownDomain(_))
    }
}
