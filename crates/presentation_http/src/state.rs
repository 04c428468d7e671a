//! Application state shared across handlers

use std::sync::Arc;

use ai_core::TranslationGateway;
use ai_speech::SpeechGateway;
use application::{
    error::ApplicationError,
    ports::{SpeechPort, TranslationPort},
};
use infrastructure::{AppConfig, SpeechGatewayAdapter, TranslationGatewayAdapter};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Lesson generator
    pub translation: Arc<dyn TranslationPort>,
    /// Speech synthesis with client fallback
    pub speech: Arc<dyn SpeechPort>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Wire both gateways in-process from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client for a backend cannot be built.
    pub fn from_config(config: AppConfig) -> Result<Self, ApplicationError> {
        let translation = TranslationGateway::from_config(&config.translation)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        let speech = SpeechGateway::from_config(&config.speech)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;

        Ok(Self {
            translation: Arc::new(TranslationGatewayAdapter::new(Arc::new(translation))),
            speech: Arc::new(SpeechGatewayAdapter::new(Arc::new(speech))),
            config: Arc::new(config),
        })
    }

    /// Translation provider used when a request names none
    pub fn default_translation_provider(&self) -> &str {
        &self.config.translation.default_provider
    }

    /// Speech provider used when a request names none
    pub fn default_speech_provider(&self) -> &str {
        &self.config.speech.default_provider
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
