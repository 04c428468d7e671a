//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Unknown speech register
    #[error("Invalid register: {0}")]
    InvalidRegister(String),

    /// Unknown teacher voice
    #[error("Invalid teacher: {0}")]
    InvalidTeacher(String),

    /// Unknown classroom layout
    #[error("Invalid classroom: {0}")]
    InvalidClassroom(String),

    /// Entity not found
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Create a not found error
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }
}
