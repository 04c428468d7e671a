//! API error handling

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Translation failed; the body echoes the provider that was asked
    #[error("Failed to get AI response: {message}")]
    Lesson { message: String, provider: String },

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Wrap a translation failure for `provider`
    pub fn lesson(err: &ApplicationError, provider: impl Into<String>) -> Self {
        let message = match err {
            ApplicationError::Provider(m) | ApplicationError::Parse(m) => m.clone(),
            other => other.to_string(),
        };
        Self::Lesson {
            message,
            provider: provider.into(),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Provider the request was routed to, for translation failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Lesson { .. } | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = match self {
            Self::BadRequest(msg) => ErrorResponse {
                error: msg,
                provider: None,
            },
            Self::Lesson { message, provider } => ErrorResponse {
                error: format!("Failed to get AI response: {message}"),
                provider: Some(provider),
            },
            other => ErrorResponse {
                error: other.to_string(),
                provider: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(e) => Self::BadRequest(e.to_string()),
            ApplicationError::Validation(msg) => Self::BadRequest(msg),
            ApplicationError::NotFound { .. } => Self::BadRequest(err.to_string()),
            ApplicationError::Provider(msg) | ApplicationError::Speech(msg) => {
                Self::ServiceUnavailable(msg)
            },
            ApplicationError::Busy(_) => Self::ServiceUnavailable(err.to_string()),
            ApplicationError::Parse(msg)
            | ApplicationError::Playback(msg)
            | ApplicationError::Configuration(msg)
            | ApplicationError::Internal(msg) => Self::Internal(msg),
        }
    }
}
