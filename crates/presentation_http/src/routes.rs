//! Route definitions

use axum::{Router, routing::get};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoint
        .route("/health", get(handlers::health::health_check))
        // Lesson API
        .route("/api/ai", get(handlers::lesson::ask))
        .route("/api/tts", get(handlers::speech::synthesize))
        // Attach state
        .with_state(state)
}
