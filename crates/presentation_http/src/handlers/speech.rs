//! Speech handler - `GET /api/tts`
//!
//! Audio is returned raw with its viseme cues in the `visemes` header;
//! a client directive is returned as JSON with an empty `visemes` list and
//! an empty `visemes` header.

use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, HeaderValue, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use domain::{ClientDirective, SpeechOutput, TeacherVoice, VisemeCue};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::{error::ApiError, state::AppState};

/// Header carrying JSON viseme cues
pub const VISEMES_HEADER: &str = "visemes";

/// Query parameters of a speech request
#[derive(Debug, Default, Deserialize)]
pub struct SpeechParams {
    pub text: Option<String>,
    /// "Nanami" or "Naoki"
    pub teacher: Option<String>,
    /// "azure", "lovo" or "browser"
    pub provider: Option<String>,
}

/// Directive body sent when the client must speak itself
#[derive(Debug, Serialize, Deserialize)]
pub struct DirectiveResponse {
    #[serde(flatten)]
    pub directive: ClientDirective,
    pub visemes: Vec<VisemeCue>,
}

/// Vocalize text with the chosen teacher
#[instrument(skip(state, params), fields(provider = tracing::field::Empty))]
pub async fn synthesize(
    State(state): State<AppState>,
    Query(params): Query<SpeechParams>,
) -> Result<Response, ApiError> {
    let text = params
        .text
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("text is required".to_string()))?;
    let voice = match params.teacher.as_deref() {
        Some(teacher) => teacher
            .parse::<TeacherVoice>()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?,
        None => TeacherVoice::default(),
    };
    let provider = params
        .provider
        .unwrap_or_else(|| state.default_speech_provider().to_string());
    tracing::Span::current().record("provider", provider.as_str());

    let output = state.speech.synthesize(&text, voice, Some(provider)).await?;

    match output {
        SpeechOutput::Audio(audio) => {
            let mut headers = HeaderMap::new();
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(audio.format.mime_type()));

            match serde_json::to_string(&audio.visemes)
                .ok()
                .and_then(|json| HeaderValue::from_str(&json).ok())
            {
                Some(value) => {
                    headers.insert(VISEMES_HEADER, value);
                },
                None => warn!("Viseme cues could not be encoded as a header"),
            }

            debug!(bytes = audio.data.len(), visemes = audio.visemes.len(), "Serving audio");
            Ok((headers, audio.data).into_response())
        },
        SpeechOutput::ClientDirective(directive) => {
            debug!("Serving client directive");
            let headers = [(VISEMES_HEADER, HeaderValue::from_static("[]"))];
            Ok((
                headers,
                Json(DirectiveResponse {
                    directive,
                    visemes: Vec::new(),
                }),
            )
                .into_response())
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_body_is_flat() {
        let body = DirectiveResponse {
            directive: ClientDirective::japanese("はい", "Naoki"),
            visemes: Vec::new(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["text"], "はい");
        assert_eq!(json["voice"], "Naoki");
        assert_eq!(json["lang"], "ja-JP");
        assert_eq!(json["visemes"], serde_json::json!([]));
    }
}
