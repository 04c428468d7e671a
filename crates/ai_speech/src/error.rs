//! Speech synthesis errors

use thiserror::Error;

/// Errors that can occur during speech synthesis
///
/// Only [`SpeechError::EmptyText`] leaves the gateway; backend failures are
/// logged and replaced with a client directive.
#[derive(Debug, Error)]
pub enum SpeechError {
    /// Nothing to say
    #[error("Text to synthesize is empty")]
    EmptyText,

    /// Failed to connect to speech service
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to speech service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Timeout during synthesis
    #[error("Speech synthesis timed out")]
    Timeout,

    /// Response did not have the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Audio could not be read
    #[error("Invalid audio: {0}")]
    InvalidAudio(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for SpeechError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}

impl From<hound::Error> for SpeechError {
    fn from(err: hound::Error) -> Self {
        Self::InvalidAudio(err.to_string())
    }
}
