//! Domain-level errors.
//!
//! These are the errors a user capability provider reports. Their rendered
//! text carries the phrases the gRPC boundary classifies on ("not found",
//! "already exists", "invalid credentials", "insufficient rights",
//! "validation"), so a structured variant and an equivalent free-form
//! message end up with the same status code.

use thiserror::Error;

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed for a field or input
    #[error("validation error: {0}")]
    Validation(String),

    /// Entity not found
    #[error("{0} not found")]
    NotFound(String),

    /// Entity already exists (conflict)
    #[error("{0} already exists")]
    Conflict(String),

    /// Email/password pair did not match
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Actor is not allowed to perform the action
    #[error("insufficient rights")]
    InsufficientRights,

    /// Any other failure, rendered verbatim
    #[error("{0}")]
    Other(String),
}

impl DomainError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>) -> Self {
        DomainError::NotFound(entity.into())
    }

    /// Create a conflict error
    pub fn conflict(entity: impl Into<String>) -> Self {
        DomainError::Conflict(entity.into())
    }

    /// Create an error from a free-form message
    pub fn other(msg: impl Into<String>) -> Self {
        DomainError::Other(msg.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rendered_text_carries_classification_phrase() {
        assert_eq!(DomainError::not_found("user").to_string(), "user not found");
        assert_eq!(
            DomainError::conflict("user").to_string(),
            "user already exists"
        );
        assert_eq!(
            DomainError::validation("email is malformed").to_string(),
            "validation error: email is malformed"
        );
        assert_eq!(
            DomainError::InvalidCredentials.to_string(),
            "invalid credentials"
        );
        assert_eq!(
            DomainError::InsufficientRights.to_string(),
            "insufficient rights"
        );
    }

    #[test]
    fn test_other_is_verbatim() {
        assert_eq!(DomainError::other("disk on fire").to_string(), "disk on fire");
    }
}
