//! Translation gateway
//!
//! Routes each question to one of the two backends and decodes the reply
//! strictly into a [`TranslationResult`].

use std::sync::Arc;

use domain::{Register, TranslationResult};
use tracing::{debug, info, instrument, warn};

use crate::{
    backends::{OpenAiBackend, OpenRouterBackend},
    config::TranslationConfig,
    error::TranslationError,
    ports::{BackendKind, TranslationBackend},
    prompt::build_prompt,
};

/// Entry point for translations
#[derive(Clone)]
pub struct TranslationGateway {
    openai: Arc<dyn TranslationBackend>,
    openrouter: Arc<dyn TranslationBackend>,
    default_provider: String,
}

impl std::fmt::Debug for TranslationGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationGateway")
            .field("available_backends", &self.available_backends())
            .field("default_provider", &self.default_provider)
            .finish()
    }
}

impl TranslationGateway {
    /// Build both backends from configuration
    pub fn from_config(config: &TranslationConfig) -> Result<Self, TranslationError> {
        let openai = OpenAiBackend::new(&config.openai, config)?;
        let openrouter = OpenRouterBackend::new(&config.openrouter, config)?;
        Ok(Self::new(
            Arc::new(openai),
            Arc::new(openrouter),
            config.default_provider.clone(),
        ))
    }

    pub fn new(
        openai: Arc<dyn TranslationBackend>,
        openrouter: Arc<dyn TranslationBackend>,
        default_provider: impl Into<String>,
    ) -> Self {
        Self {
            openai,
            openrouter,
            default_provider: default_provider.into(),
        }
    }

    /// Provider used when a request names none
    pub fn default_provider(&self) -> &str {
        &self.default_provider
    }

    /// Backend that would serve the given hint
    pub fn select(&self, hint: Option<&str>) -> BackendKind {
        let hint = hint.unwrap_or(&self.default_provider);
        BackendKind::select(Some(hint), self.openai.is_configured())
    }

    /// Backends with a configured credential
    pub fn available_backends(&self) -> Vec<BackendKind> {
        [&self.openai, &self.openrouter]
            .into_iter()
            .filter(|b| b.is_configured())
            .map(|b| b.kind())
            .collect()
    }

    fn backend(&self, kind: BackendKind) -> &dyn TranslationBackend {
        match kind {
            BackendKind::OpenAi => self.openai.as_ref(),
            BackendKind::OpenRouter => self.openrouter.as_ref(),
        }
    }

    /// Translate an English question into a structured Japanese lesson
    #[instrument(skip(self, question), fields(register = %register, hint = ?hint))]
    pub async fn translate(
        &self,
        question: &str,
        register: Register,
        hint: Option<&str>,
    ) -> Result<TranslationResult, TranslationError> {
        if question.trim().is_empty() {
            return Err(TranslationError::Validation(
                "question cannot be empty".to_string(),
            ));
        }

        let kind = self.select(hint);
        debug!(backend = %kind, "Selected translation backend");

        let messages = build_prompt(question, register)?;
        let content = self.backend(kind).complete(&messages).await?;
        let result = decode(&content)?;

        if !result.is_consistent() {
            warn!(backend = %kind, "Grammar breakdown does not match translated words");
        }

        info!(
            backend = %kind,
            words = result.japanese.len(),
            sentences = result.sentence_count(),
            "Translation completed"
        );

        Ok(result)
    }
}

/// Decode assistant content as a translation; no partial results
pub fn decode(content: &str) -> Result<TranslationResult, TranslationError> {
    serde_json::from_str(content)
        .map_err(|e| TranslationError::Parse(format!("content is not a translation: {e}")))
}
