//! Application configuration
//!
//! Values are layered: built-in defaults, an optional `config.toml` in the
//! working directory, then `SENSEI__SECTION__KEY` environment variables.
//! The vendor variables the hosted deployment uses (`OPENAI_API_KEY`,
//! `AZURE_SPEECH_KEY`, ...) are honoured last and only fill values that are
//! still unset.

mod client;
mod server;

use ai_core::TranslationConfig;
use ai_speech::SpeechConfig;
pub use client::ClientConfig;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
pub use server::ServerConfig;
use tracing::debug;

/// Environment prefix for structured overrides
pub const ENV_PREFIX: &str = "SENSEI";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub translation: TranslationConfig,

    #[serde(default)]
    pub speech: SpeechConfig,

    #[serde(default)]
    pub client: ClientConfig,
}

impl AppConfig {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration using `file` (without extension) as the optional file source
    pub fn load_from(file: &str) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // Start with defaults
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            // Load from file if exists
            .add_source(config::File::with_name(file).required(false))
            // Override with environment variables (e.g., SENSEI__SERVER__PORT)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;
        config.apply_vendor_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Fill unset credentials and provider selectors from vendor variables
    ///
    /// Keys are only taken when none is configured. Provider selectors only
    /// replace the built-in default, never an explicit choice.
    pub fn apply_vendor_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        fill_secret(&mut self.translation.openai.api_key, value("OPENAI_API_KEY"));
        fill_secret(
            &mut self.translation.openrouter.api_key,
            value("OPENROUTER_API_KEY"),
        );
        fill_secret(&mut self.speech.azure.api_key, value("AZURE_SPEECH_KEY"));
        fill_secret(&mut self.speech.lovo.api_key, value("LOVO_API_KEY"));

        if self.speech.azure.region.is_none() {
            self.speech.azure.region = value("AZURE_SPEECH_REGION");
        }

        if let Some(provider) = value("AI_PROVIDER") {
            if self.translation.default_provider == TranslationConfig::default().default_provider {
                debug!(provider = %provider, "Translation provider taken from AI_PROVIDER");
                self.translation.default_provider = provider;
            }
        }

        if let Some(provider) = value("SPEECH_PROVIDER") {
            if self.speech.default_provider == SpeechConfig::default().default_provider {
                debug!(provider = %provider, "Speech provider taken from SPEECH_PROVIDER");
                self.speech.default_provider = provider;
            }
        }
    }

    /// Names of the backends that have credentials
    pub fn configured_backends(&self) -> Vec<&'static str> {
        let mut backends = Vec::new();
        if self.translation.openai.is_configured() {
            backends.push("openai");
        }
        if self.translation.openrouter.is_configured() {
            backends.push("openrouter");
        }
        if self.speech.azure.is_configured() {
            backends.push("azure");
        }
        if self.speech.lovo.is_configured() {
            backends.push("lovo");
        }
        backends
    }
}

fn fill_secret(slot: &mut Option<SecretString>, value: Option<String>) {
    if slot.is_none() {
        if let Some(value) = value {
            *slot = Some(SecretString::from(value));
        }
    }
}
