//! Speech adapter - Implements SpeechPort using the ai_speech gateway

use std::sync::Arc;

use ai_speech::{SpeechError, SpeechGateway};
use application::{error::ApplicationError, ports::SpeechPort};
use async_trait::async_trait;
use domain::{SpeechOutput, TeacherVoice};
use tracing::instrument;

/// Adapter running the speech gateway in-process
#[derive(Debug, Clone)]
pub struct SpeechGatewayAdapter {
    gateway: Arc<SpeechGateway>,
}

impl SpeechGatewayAdapter {
    pub const fn new(gateway: Arc<SpeechGateway>) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &SpeechGateway {
        &self.gateway
    }

    /// Map speech error to application error
    fn map_error(err: SpeechError) -> ApplicationError {
        match err {
            SpeechError::EmptyText => ApplicationError::Validation(err.to_string()),
            SpeechError::Configuration(e) => ApplicationError::Configuration(e),
            other => ApplicationError::Speech(other.to_string()),
        }
    }
}

#[async_trait]
impl SpeechPort for SpeechGatewayAdapter {
    #[instrument(skip(self, text), fields(text_len = text.len(), voice = %voice))]
    async fn synthesize(
        &self,
        text: &str,
        voice: TeacherVoice,
        provider: Option<String>,
    ) -> Result<SpeechOutput, ApplicationError> {
        self.gateway
            .synthesize(text, voice, provider.as_deref())
            .await
            .map_err(Self::map_error)
    }
}
