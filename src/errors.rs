// Copyright 2025 Cowboy AI, LLC.

//! Error types for domain operations

use thiserror::Error;

/// Errors that can occur in domain operations
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    /// A type name did not match any registered object type
    #[error("Unknown object type: {0}")]
    UnknownObjectType(String),

    /// A mixin layer reference chain loops back on itself
    #[error("Mixin layer cycle: {path}")]
    MixinCycle {
        /// The reference path that closed the cycle, e.g. "a -> b -> a"
        path: String,
    },

    /// Entity not found
    #[error("Entity not found: {entity_type} with id {id}")]
    EntityNotFound {
        /// Type of entity that wasn't found
        entity_type: String,
        /// ID that was searched for
        id: u64,
    },

    /// No role exists with the requested name
    #[error("Role not found: {0}")]
    RoleNotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// The backend rejected a create/update/destroy operation
    #[error("Persistence failure during {operation}: {message}")]
    PersistenceFailure {
        /// The operation that was rejected
        operation: String,
        /// Error message from the backend
        message: String,
    },

    /// One or more operations in a batch failed
    #[error("Batch failure: {0:?}")]
    BatchFailure(Vec<String>),

    /// A query request could not be built or executed
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DomainError::EntityNotFound {
            entity_type: "Audit".to_string(),
            id: 42,
        };
        assert_eq!(err.to_string(), "Entity not found: Audit with id 42");

        let err = DomainError::MixinCycle {
            path: "directive -> issues -> directive".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Mixin layer cycle: directive -> issues -> directive"
        );
    }

    #[test]
    fn test_batch_failure_aggregates_messages() {
        let err = DomainError::BatchFailure(vec![
            "create rejected".to_string(),
            "destroy rejected".to_string(),
        ]);
        assert!(err.to_string().contains("create rejected"));
        assert!(err.to_string().contains("destroy rejected"));
    }
}
