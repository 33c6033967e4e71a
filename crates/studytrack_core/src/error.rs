//! crates/studytrack_core/src/error.rs
//!
//! The error taxonomy shared by the domain, the use-cases and every port.
//! Storage and transport layers translate their own failures into one of
//! these four kinds, so callers can match on it exhaustively.

/// A domain-level error. Every fallible operation in the core returns this.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A referenced entity does not exist, or belongs to another user.
    #[error("{0}")]
    NotFound(String),
    /// Input failed an entity invariant.
    #[error("{0}")]
    Validation(String),
    /// The write collides with existing state (e.g. a duplicate subject name).
    #[error("{0}")]
    Conflict(String),
    /// Anything else, typically a storage failure.
    #[error("An unexpected error occurred: {0}")]
    Internal(String),
}

impl DomainError {
    /// Builds a `NotFound` error of the form `"<entity> not found"`.
    pub fn not_found(entity: &str) -> Self {
        Self::NotFound(format!("{} not found", entity))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}

/// A convenience type alias for `Result<T, DomainError>`.
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_entity() {
        let err = DomainError::not_found("subject");
        assert_eq!(err.to_string(), "subject not found");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn kind_predicates_are_exclusive() {
        assert!(DomainError::validation("bad").is_validation());
        assert!(DomainError::conflict("dup").is_conflict());
        let internal = DomainError::internal("pool closed");
        assert!(!internal.is_not_found() && !internal.is_validation() && !internal.is_conflict());
        assert_eq!(internal.to_string(), "An unexpected error occurred: pool closed");
    }
}
