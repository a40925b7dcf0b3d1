//! Domain-level error types.

use thiserror::Error;
use uuid::Uuid;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: Uuid },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Storage failure: {0}")]
    Storage(#[from] RepoError),
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

/// Mediator configuration errors, raised while the handler table is built.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("No handler registered for request `{0}`")]
    MissingHandler(&'static str),

    #[error("More than one handler registered for request `{0}`")]
    DuplicateHandler(&'static str),
}
