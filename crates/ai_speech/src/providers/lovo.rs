//! LOVO (Genny) text-to-speech
//!
//! The synchronous endpoint answers with links to the rendered audio rather
//! than the audio itself; the first link is downloaded. LOVO does not report
//! visemes, so the timeline is always empty.

use std::time::Duration;

use async_trait::async_trait;
use domain::{AudioFormat, SynthesizedAudio, TeacherVoice, VisemeTimeline};
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::{
    config::{LovoConfig, SpeechProvider},
    error::SpeechError,
    ports::TextToSpeech,
};

/// LOVO speech synthesis
pub struct LovoSpeechProvider {
    client: Client,
    config: LovoConfig,
}

impl std::fmt::Debug for LovoSpeechProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LovoSpeechProvider")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize)]
struct LovoTtsRequest<'a> {
    text: &'a str,
    speaker: &'a str,
    speed: f32,
}

#[derive(Debug, Deserialize)]
struct LovoTtsResponse {
    #[serde(default)]
    data: Vec<LovoTtsData>,
}

#[derive(Debug, Deserialize)]
struct LovoTtsData {
    #[serde(default)]
    urls: Vec<String>,
}

impl LovoTtsResponse {
    fn first_url(self) -> Option<String> {
        self.data.into_iter().flat_map(|d| d.urls).next()
    }
}

impl LovoSpeechProvider {
    pub fn new(config: LovoConfig, timeout_ms: u64) -> Result<Self, SpeechError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| {
                SpeechError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        info!(
            speaker = %config.speaker,
            configured = config.is_configured(),
            "Initialized LOVO speech provider"
        );

        Ok(Self { client, config })
    }

    fn tts_url(&self) -> String {
        format!(
            "{}/api/v1/tts/sync",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl TextToSpeech for LovoSpeechProvider {
    /// LOVO uses a single configured speaker for every teacher
    #[instrument(skip(self, text), fields(text_len = text.len(), speaker = %self.config.speaker))]
    async fn synthesize(
        &self,
        text: &str,
        _voice: TeacherVoice,
    ) -> Result<SynthesizedAudio, SpeechError> {
        let key = self
            .config
            .api_key
            .as_ref()
            .ok_or_else(|| SpeechError::Configuration("LOVO key is not set".to_string()))?;

        let request = LovoTtsRequest {
            text,
            speaker: &self.config.speaker,
            speed: self.config.speed,
        };

        debug!("Synthesizing speech with LOVO");

        let response = self
            .client
            .post(self.tts_url())
            .header("X-API-KEY", key.expose_secret())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "LOVO synthesis failed");
            return Err(SpeechError::RequestFailed(format!("Status {status}: {body}")));
        }

        let job: LovoTtsResponse = response
            .json()
            .await
            .map_err(|e| SpeechError::InvalidResponse(e.to_string()))?;
        let url = job
            .first_url()
            .ok_or_else(|| SpeechError::InvalidResponse("no audio url in response".to_string()))?;

        let audio = self.client.get(&url).send().await?;
        if !audio.status().is_success() {
            return Err(SpeechError::RequestFailed(format!(
                "audio download returned {}",
                audio.status()
            )));
        }

        let data = audio.bytes().await?.to_vec();
        if data.is_empty() {
            return Err(SpeechError::InvalidResponse("audio is empty".to_string()));
        }

        debug!(bytes = data.len(), "LOVO synthesis completed");

        Ok(SynthesizedAudio {
            data,
            format: AudioFormat::Wav,
            visemes: VisemeTimeline::empty(),
        })
    }

    fn provider(&self) -> SpeechProvider {
        SpeechProvider::Lovo
    }

    fn is_configured(&self) -> bool {
        self.config.is_configured()
    }
}
