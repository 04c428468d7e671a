//! OpenAI and OpenRouter translation backends

use async_trait::async_trait;
use tracing::info;

use crate::{
    chat_client::{ChatCompletionClient, ChatEndpoint},
    config::{OpenAiConfig, OpenRouterConfig, TranslationConfig, has_secret},
    error::TranslationError,
    ports::{BackendKind, PromptMessage, TranslationBackend},
};

/// OpenAI chat completions with bearer auth
#[derive(Debug)]
pub struct OpenAiBackend {
    client: ChatCompletionClient,
}

impl OpenAiBackend {
    pub fn new(config: &OpenAiConfig, shared: &TranslationConfig) -> Result<Self, TranslationError> {
        let client = ChatCompletionClient::new(ChatEndpoint {
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            headers: Vec::new(),
            temperature: shared.temperature,
            max_tokens: shared.max_tokens,
            timeout_ms: shared.timeout_ms,
        })?;

        info!(
            base_url = %config.base_url,
            model = %config.model,
            configured = config.is_configured(),
            "Initialized OpenAI backend"
        );

        Ok(Self { client })
    }
}

#[async_trait]
impl TranslationBackend for OpenAiBackend {
    async fn complete(&self, messages: &[PromptMessage]) -> Result<String, TranslationError> {
        self.client.complete(messages).await
    }

    fn kind(&self) -> BackendKind {
        BackendKind::OpenAi
    }

    fn is_configured(&self) -> bool {
        has_secret(self.client.endpoint().api_key.as_ref())
    }
}

/// OpenRouter chat completions with bearer auth and `HTTP-Referer`
#[derive(Debug)]
pub struct OpenRouterBackend {
    client: ChatCompletionClient,
}

impl OpenRouterBackend {
    pub fn new(
        config: &OpenRouterConfig,
        shared: &TranslationConfig,
    ) -> Result<Self, TranslationError> {
        let client = ChatCompletionClient::new(ChatEndpoint {
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            headers: vec![("HTTP-Referer".to_string(), config.referer.clone())],
            temperature: shared.temperature,
            max_tokens: shared.max_tokens,
            timeout_ms: shared.timeout_ms,
        })?;

        info!(
            base_url = %config.base_url,
            model = %config.model,
            configured = config.is_configured(),
            "Initialized OpenRouter backend"
        );

        Ok(Self { client })
    }
}

#[async_trait]
impl TranslationBackend for OpenRouterBackend {
    async fn complete(&self, messages: &[PromptMessage]) -> Result<String, TranslationError> {
        self.client.complete(messages).await
    }

    fn kind(&self) -> BackendKind {
        BackendKind::OpenRouter
    }

    fn is_configured(&self) -> bool {
        has_secret(self.client.endpoint().api_key.as_ref())
    }
}
