//! Configuration for the translation backends

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Configuration for the translation gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    /// Provider used when a request names none ("openai" or "openrouter")
    #[serde(default = "default_provider")]
    pub default_provider: String,

    #[serde(default)]
    pub openai: OpenAiConfig,

    #[serde(default)]
    pub openrouter: OpenRouterConfig,

    /// Sampling temperature shared by both backends
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Request timeout in milliseconds; free-tier models can take minutes
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_provider() -> String {
    "openrouter".to_string()
}

const fn default_temperature() -> f32 {
    0.4
}

const fn default_max_tokens() -> u32 {
    1000
}

const fn default_timeout_ms() -> u64 {
    180_000
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            default_provider: default_provider(),
            openai: OpenAiConfig::default(),
            openrouter: OpenRouterConfig::default(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// OpenAI chat completions
#[derive(Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// API key (never serialized)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    #[serde(default = "default_openai_base_url")]
    pub base_url: String,

    #[serde(default = "default_openai_model")]
    pub model: String,
}

impl fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_openai_model() -> String {
    "gpt-3.5-turbo".to_string()
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_openai_base_url(),
            model: default_openai_model(),
        }
    }
}

impl OpenAiConfig {
    /// Whether a non-empty API key is configured
    pub fn is_configured(&self) -> bool {
        has_secret(self.api_key.as_ref())
    }
}

/// OpenRouter chat completions
#[derive(Clone, Serialize, Deserialize)]
pub struct OpenRouterConfig {
    /// API key (never serialized)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    #[serde(default = "default_openrouter_base_url")]
    pub base_url: String,

    #[serde(default = "default_openrouter_model")]
    pub model: String,

    /// Sent as `HTTP-Referer`, which OpenRouter uses to attribute traffic
    #[serde(default = "default_referer")]
    pub referer: String,
}

impl fmt::Debug for OpenRouterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenRouterConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("referer", &self.referer)
            .finish()
    }
}

fn default_openrouter_base_url() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_openrouter_model() -> String {
    "mistralai/mistral-7b-instruct:free".to_string()
}

fn default_referer() -> String {
    "http://localhost:3000".to_string()
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_openrouter_base_url(),
            model: default_openrouter_model(),
            referer: default_referer(),
        }
    }
}

impl OpenRouterConfig {
    pub fn is_configured(&self) -> bool {
        has_secret(self.api_key.as_ref())
    }
}

/// A credential counts only when it is present and not blank
pub(crate) fn has_secret(secret: Option<&SecretString>) -> bool {
    secret.is_some_and(|s| !s.expose_secret().trim().is_empty())
}
