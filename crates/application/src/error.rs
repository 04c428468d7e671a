//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Translation backend could not be reached or refused the request
    #[error("Provider error: {0}")]
    Provider(String),

    /// Translation reply had the wrong shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// Speech synthesis was rejected
    #[error("Speech error: {0}")]
    Speech(String),

    /// Playback side effect failed
    #[error("Playback error: {0}")]
    Playback(String),

    /// Another ask or play is still running
    #[error("Busy: {0} in progress")]
    Busy(String),

    /// Referenced entity does not exist
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Invalid input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Whether the caller may simply try again later
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Provider(_) | Self::Busy(_))
    }

    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }
}
