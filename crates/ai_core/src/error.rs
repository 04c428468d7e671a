//! Translation errors

use thiserror::Error;

/// Errors that can occur while translating a question
#[derive(Debug, Error)]
pub enum TranslationError {
    /// Network, authentication or non-success status from a backend
    #[error("Provider error: {0}")]
    Provider(String),

    /// The reply did not match the expected translation shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// Required input was missing
    #[error("Validation error: {0}")]
    Validation(String),

    /// Backend could not be constructed
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for TranslationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Provider(format!("request timed out: {err}"))
        } else if err.is_connect() {
            Self::Provider(format!("connection failed: {err}"))
        } else if err.is_decode() {
            Self::Parse(err.to_string())
        } else {
            Self::Provider(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_message() {
        let err = TranslationError::Provider("Status 401".to_string());
        assert_eq!(err.to_string(), "Provider error: Status 401");
    }

    #[test]
    fn parse_error_message() {
        let err = TranslationError::Parse("missing field `japanese`".to_string());
        assert_eq!(err.to_string(), "Parse error: missing field `japanese`");
    }

    #[test]
    fn validation_error_message() {
        let err = TranslationError::Validation("question is empty".to_string());
        assert_eq!(err.to_string(), "Validation error: question is empty");
    }
}
