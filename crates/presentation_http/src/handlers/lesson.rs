//! Lesson handler - `GET /api/ai`

use ai_core::prompt::DEFAULT_QUESTION;
use axum::{
    Json,
    extract::{Query, State},
};
use domain::{Question, Register, TranslationResult};
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::{error::ApiError, state::AppState};

/// Query parameters of a lesson request
#[derive(Debug, Default, Deserialize)]
pub struct LessonParams {
    /// English text; defaults to a sample question
    pub question: Option<String>,
    /// "formal" or "casual"
    pub speech: Option<String>,
    /// "openai" or "openrouter"
    pub provider: Option<String>,
}

/// Translate a question into a Japanese lesson
#[instrument(skip(state, params), fields(provider = tracing::field::Empty))]
pub async fn ask(
    State(state): State<AppState>,
    Query(params): Query<LessonParams>,
) -> Result<Json<TranslationResult>, ApiError> {
    let register = match params.speech.as_deref() {
        Some(speech) => speech
            .parse::<Register>()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?,
        None => Register::default(),
    };
    let provider = params
        .provider
        .unwrap_or_else(|| state.default_translation_provider().to_string());
    tracing::Span::current().record("provider", provider.as_str());

    let text = params.question.unwrap_or_else(|| DEFAULT_QUESTION.to_string());
    if text.trim().is_empty() {
        return Err(ApiError::BadRequest("question cannot be empty".to_string()));
    }

    let question = Question::new(text, register).with_provider(provider.clone());
    match state.translation.translate(&question).await {
        Ok(lesson) => {
            info!(words = lesson.japanese.len(), "Lesson served");
            Ok(Json(lesson))
        },
        Err(e) => {
            warn!(error = %e, "Lesson request failed");
            Err(ApiError::lesson(&e, provider))
        },
    }
}
