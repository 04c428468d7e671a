//! Health check handler

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Backends with credentials
    pub backends: Vec<String>,
    pub default_translation_provider: String,
    pub default_speech_provider: String,
}

/// Liveness check with the configured backends
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        backends: state
            .config
            .configured_backends()
            .into_iter()
            .map(String::from)
            .collect(),
        default_translation_provider: state.default_translation_provider().to_string(),
        default_speech_provider: state.default_speech_provider().to_string(),
    })
}
