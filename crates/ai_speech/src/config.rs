//! Configuration for speech synthesis

use std::{fmt, str::FromStr};

use domain::TeacherVoice;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Configuration for the speech gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Provider used when a request names none ("azure", "lovo" or "browser")
    #[serde(default = "default_provider")]
    pub default_provider: String,

    #[serde(default)]
    pub azure: AzureConfig,

    #[serde(default)]
    pub lovo: LovoConfig,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_provider() -> String {
    "browser".to_string()
}

const fn default_timeout_ms() -> u64 {
    30_000
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            default_provider: default_provider(),
            azure: AzureConfig::default(),
            lovo: LovoConfig::default(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Speech provider selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeechProvider {
    /// Azure Cognitive Services neural voices
    Azure,
    /// LOVO (Genny) voices
    Lovo,
    /// Platform speech on the client
    Browser,
}

impl SpeechProvider {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Azure => "azure",
            Self::Lovo => "lovo",
            Self::Browser => "browser",
        }
    }
}

impl fmt::Display for SpeechProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpeechProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "azure" => Ok(Self::Azure),
            "lovo" => Ok(Self::Lovo),
            "browser" => Ok(Self::Browser),
            other => Err(format!("unknown speech provider: {other}")),
        }
    }
}

/// Azure text-to-speech REST API
#[derive(Clone, Serialize, Deserialize)]
pub struct AzureConfig {
    /// Subscription key (never serialized)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Region such as "japaneast"
    #[serde(default)]
    pub region: Option<String>,

    /// Full endpoint override; derived from the region when unset
    #[serde(default)]
    pub endpoint: Option<String>,

    #[serde(default = "default_nanami_voice")]
    pub nanami_voice: String,

    #[serde(default = "default_naoki_voice")]
    pub naoki_voice: String,

    /// Value of `X-Microsoft-OutputFormat`
    #[serde(default = "default_output_format")]
    pub output_format: String,
}

impl fmt::Debug for AzureConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AzureConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .field("nanami_voice", &self.nanami_voice)
            .field("naoki_voice", &self.naoki_voice)
            .field("output_format", &self.output_format)
            .finish()
    }
}

fn default_nanami_voice() -> String {
    "ja-JP-NanamiNeural".to_string()
}

fn default_naoki_voice() -> String {
    "ja-JP-KeitaNeural".to_string()
}

fn default_output_format() -> String {
    "riff-24khz-16bit-mono-pcm".to_string()
}

impl Default for AzureConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            region: None,
            endpoint: None,
            nanami_voice: default_nanami_voice(),
            naoki_voice: default_naoki_voice(),
            output_format: default_output_format(),
        }
    }
}

impl AzureConfig {
    /// Both key and region are required
    pub fn is_configured(&self) -> bool {
        has_secret(self.api_key.as_ref())
            && self.region.as_deref().is_some_and(|r| !r.trim().is_empty())
    }

    /// Synthesis endpoint URL
    pub fn endpoint_url(&self) -> Option<String> {
        if let Some(endpoint) = &self.endpoint {
            return Some(endpoint.clone());
        }
        self.region.as_deref().map(|region| {
            format!("https://{region}.tts.speech.microsoft.com/cognitiveservices/v1")
        })
    }

    /// Neural voice for a teacher
    pub fn voice_for(&self, teacher: TeacherVoice) -> &str {
        match teacher {
            TeacherVoice::Nanami => &self.nanami_voice,
            TeacherVoice::Naoki => &self.naoki_voice,
        }
    }
}

/// LOVO (Genny) synchronous TTS API
#[derive(Clone, Serialize, Deserialize)]
pub struct LovoConfig {
    /// API key (never serialized)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    #[serde(default = "default_lovo_base_url")]
    pub base_url: String,

    /// Speaker id
    #[serde(default = "default_speaker")]
    pub speaker: String,

    #[serde(default = "default_speed")]
    pub speed: f32,
}

impl fmt::Debug for LovoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LovoConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("speaker", &self.speaker)
            .field("speed", &self.speed)
            .finish()
    }
}

fn default_lovo_base_url() -> String {
    "https://api.genny.lovo.ai".to_string()
}

fn default_speaker() -> String {
    "JP-F-001".to_string()
}

const fn default_speed() -> f32 {
    1.0
}

impl Default for LovoConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_lovo_base_url(),
            speaker: default_speaker(),
            speed: default_speed(),
        }
    }
}

impl LovoConfig {
    pub fn is_configured(&self) -> bool {
        has_secret(self.api_key.as_ref())
    }
}

fn has_secret(secret: Option<&SecretString>) -> bool {
    secret.is_some_and(|s| !s.expose_secret().trim().is_empty())
}
