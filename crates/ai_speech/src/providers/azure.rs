//! Azure Cognitive Services text-to-speech
//!
//! Uses the REST synthesis endpoint with an SSML body. The endpoint does not
//! report viseme events, so the timeline is estimated from the text and the
//! length of the returned WAV.

use std::time::Duration;

use async_trait::async_trait;
use domain::{AudioFormat, SynthesizedAudio, TeacherVoice};
use quick_xml::escape::escape;
use reqwest::Client;
use secrecy::ExposeSecret;
use tracing::{debug, info, instrument, warn};

use crate::{
    config::{AzureConfig, SpeechProvider},
    error::SpeechError,
    ports::TextToSpeech,
    visemes::{estimate_timeline, wav_duration_ms},
};

/// Azure neural voice synthesis
pub struct AzureSpeechProvider {
    client: Client,
    config: AzureConfig,
}

impl std::fmt::Debug for AzureSpeechProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureSpeechProvider")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AzureSpeechProvider {
    /// Create a new Azure provider
    ///
    /// Construction succeeds without credentials; [`TextToSpeech::is_configured`]
    /// reports whether the provider can actually be used.
    pub fn new(config: AzureConfig, timeout_ms: u64) -> Result<Self, SpeechError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| {
                SpeechError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        info!(
            region = ?config.region,
            configured = config.is_configured(),
            "Initialized Azure speech provider"
        );

        Ok(Self { client, config })
    }

    fn ssml(voice: &str, text: &str) -> String {
        format!(
            "<speak version='1.0' xml:lang='ja-JP'><voice xml:lang='ja-JP' name='{voice}'>{}</voice></speak>",
            escape(text)
        )
    }
}

#[async_trait]
impl TextToSpeech for AzureSpeechProvider {
    #[instrument(skip(self, text), fields(text_len = text.len(), voice = %voice))]
    async fn synthesize(
        &self,
        text: &str,
        voice: TeacherVoice,
    ) -> Result<SynthesizedAudio, SpeechError> {
        let key = self
            .config
            .api_key
            .as_ref()
            .ok_or_else(|| SpeechError::Configuration("Azure key is not set".to_string()))?;
        let url = self
            .config
            .endpoint_url()
            .ok_or_else(|| SpeechError::Configuration("Azure region is not set".to_string()))?;

        let voice_name = self.config.voice_for(voice);
        debug!(voice_name, "Synthesizing speech with Azure");

        let response = self
            .client
            .post(url)
            .header("Ocp-Apim-Subscription-Key", key.expose_secret())
            .header("Content-Type", "application/ssml+xml")
            .header("X-Microsoft-OutputFormat", self.config.output_format.as_str())
            .header("User-Agent", "sensei")
            .body(Self::ssml(voice_name, text))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Azure synthesis failed");
            return Err(SpeechError::RequestFailed(format!("Status {status}: {body}")));
        }

        let data = response.bytes().await?.to_vec();
        let duration_ms = wav_duration_ms(&data)?;
        let visemes = estimate_timeline(text, duration_ms);

        debug!(
            bytes = data.len(),
            duration_ms,
            cues = visemes.len(),
            "Azure synthesis completed"
        );

        Ok(SynthesizedAudio {
            data,
            format: AudioFormat::Wav,
            visemes,
        })
    }

    fn provider(&self) -> SpeechProvider {
        SpeechProvider::Azure
    }

    fn is_configured(&self) -> bool {
        self.config.is_configured()
    }
}
