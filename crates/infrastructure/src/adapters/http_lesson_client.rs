//! HTTP client for a running Sensei server
//!
//! Implements both application ports against `GET /api/ai` and
//! `GET /api/tts`, so a terminal session can drive the conversation store
//! without holding any vendor credentials itself. The server answers speech
//! requests either with raw audio (viseme cues in the `visemes` header) or
//! with a JSON client directive; the content type decides which.

use std::time::Duration;

use application::{
    error::ApplicationError,
    ports::{SpeechPort, TranslationPort},
};
use async_trait::async_trait;
use domain::{
    AudioFormat, ClientDirective, Question, SpeechOutput, SynthesizedAudio, TeacherVoice,
    TranslationResult, VisemeTimeline,
};
use reqwest::{Client, Response, StatusCode, header::CONTENT_TYPE};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::config::ClientConfig;

/// Header carrying the JSON viseme cues of an audio response
pub const VISEMES_HEADER: &str = "visemes";

/// Error body returned by the server
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Client for the Sensei HTTP API
#[derive(Debug, Clone)]
pub struct HttpLessonClient {
    client: Client,
    base_url: String,
}

impl HttpLessonClient {
    /// Create a client for the server at `base_url`
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout_ms: u64) -> Result<Self, ApplicationError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| {
                ApplicationError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ApplicationError> {
        Self::new(config.server_url.clone(), config.timeout_ms)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Pull the server's `{error}` message, falling back to the raw body
    async fn error_message(response: Response) -> String {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        serde_json::from_str::<ErrorBody>(&body)
            .map_or_else(|_| format!("Status {status}: {body}"), |e| e.error)
    }

    fn transport_error(err: &reqwest::Error) -> ApplicationError {
        if err.is_timeout() {
            ApplicationError::Provider("Request to Sensei server timed out".to_string())
        } else if err.is_connect() {
            ApplicationError::Provider(format!("Cannot reach Sensei server: {err}"))
        } else {
            ApplicationError::Provider(err.to_string())
        }
    }

    /// Decode the `visemes` header; a malformed header only loses lip-sync
    fn visemes_from(response: &Response) -> VisemeTimeline {
        let Some(raw) = response.headers().get(VISEMES_HEADER) else {
            return VisemeTimeline::empty();
        };

        raw.to_str()
            .ok()
            .and_then(|s| serde_json::from_str(s).ok())
            .unwrap_or_else(|| {
                warn!("Ignoring malformed visemes header");
                VisemeTimeline::empty()
            })
    }

    /// Health check
    pub async fn health(&self) -> Result<serde_json::Value, ApplicationError> {
        let response = self
            .client
            .get(self.url("/health"))
            .send()
            .await
            .map_err(|e| Self::transport_error(&e))?;

        if !response.status().is_success() {
            return Err(ApplicationError::Provider(
                Self::error_message(response).await,
            ));
        }

        response
            .json()
            .await
            .map_err(|e| ApplicationError::Parse(e.to_string()))
    }
}

#[async_trait]
impl TranslationPort for HttpLessonClient {
    #[instrument(skip(self, question), fields(register = %question.register, provider = ?question.provider))]
    async fn translate(&self, question: &Question) -> Result<TranslationResult, ApplicationError> {
        let mut query = vec![
            ("question", question.text.as_str()),
            ("speech", question.register.as_str()),
        ];
        if let Some(provider) = question.provider.as_deref() {
            query.push(("provider", provider));
        }

        let response = self
            .client
            .get(self.url("/api/ai"))
            .query(&query)
            .send()
            .await
            .map_err(|e| Self::transport_error(&e))?;

        if !response.status().is_success() {
            return Err(ApplicationError::Provider(
                Self::error_message(response).await,
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Self::transport_error(&e))?;
        let result: TranslationResult = serde_json::from_str(&body)
            .map_err(|e| ApplicationError::Parse(format!("unexpected lesson body: {e}")))?;

        debug!(words = result.japanese.len(), "Received translation");
        Ok(result)
    }
}

#[async_trait]
impl SpeechPort for HttpLessonClient {
    #[instrument(skip(self, text), fields(text_len = text.len(), voice = %voice))]
    async fn synthesize(
        &self,
        text: &str,
        voice: TeacherVoice,
        provider: Option<String>,
    ) -> Result<SpeechOutput, ApplicationError> {
        let mut query = vec![("text", text), ("teacher", voice.as_str())];
        if let Some(provider) = provider.as_deref() {
            query.push(("provider", provider));
        }

        let response = match self
            .client
            .get(self.url("/api/tts"))
            .query(&query)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return Ok(Self::client_speech(text, voice, &Self::transport_error(&e))),
        };

        let status = response.status();
        if status == StatusCode::BAD_REQUEST {
            return Err(ApplicationError::Validation(
                Self::error_message(response).await,
            ));
        }
        if !status.is_success() {
            let err = ApplicationError::Speech(Self::error_message(response).await);
            return Ok(Self::client_speech(text, voice, &err));
        }

        Ok(Self::read_speech(response)
            .await
            .unwrap_or_else(|e| Self::client_speech(text, voice, &e)))
    }
}

impl HttpLessonClient {
    /// Local speech for `text` when the server cannot provide any
    fn client_speech(text: &str, voice: TeacherVoice, reason: &ApplicationError) -> SpeechOutput {
        warn!(error = %reason, "Server speech unavailable, using client speech");
        SpeechOutput::ClientDirective(ClientDirective::japanese(text, voice.as_str()))
    }

    /// Decode a successful `/api/tts` response; the content type picks the variant
    async fn read_speech(response: Response) -> Result<SpeechOutput, ApplicationError> {
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("application/json") {
            let directive: ClientDirective = response
                .json()
                .await
                .map_err(|e| ApplicationError::Parse(format!("unexpected directive: {e}")))?;
            debug!("Server asked for client speech");
            return Ok(SpeechOutput::ClientDirective(directive));
        }

        if !content_type.starts_with("audio/") {
            return Err(ApplicationError::Speech(format!(
                "unexpected content type '{content_type}'"
            )));
        }

        let format = if content_type.starts_with("audio/mpeg") {
            AudioFormat::Mp3
        } else {
            AudioFormat::Wav
        };
        let visemes = Self::visemes_from(&response);
        let data = response
            .bytes()
            .await
            .map_err(|e| Self::transport_error(&e))?
            .to_vec();

        debug!(bytes = data.len(), visemes = visemes.len(), "Received audio");
        Ok(SpeechOutput::Audio(SynthesizedAudio {
            data,
            format,
            visemes,
        }))
    }
}
