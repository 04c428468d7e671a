//! OpenAI-compatible chat completions client

use std::time::Duration;

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::{error::TranslationError, ports::PromptMessage};

/// Settings for a single chat completions endpoint
#[derive(Debug, Clone)]
pub struct ChatEndpoint {
    /// Base URL without the `/chat/completions` suffix
    pub base_url: String,
    pub model: String,
    pub api_key: Option<SecretString>,
    /// Extra headers sent with every request
    pub headers: Vec<(String, String)>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_ms: u64,
}

/// Thin client shared by the OpenAI and OpenRouter backends
#[derive(Debug)]
pub struct ChatCompletionClient {
    client: Client,
    endpoint: ChatEndpoint,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [PromptMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl ChatCompletionClient {
    pub fn new(endpoint: ChatEndpoint) -> Result<Self, TranslationError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(endpoint.timeout_ms))
            .build()
            .map_err(|e| TranslationError::Configuration(e.to_string()))?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &ChatEndpoint {
        &self.endpoint
    }

    fn url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.endpoint.base_url.trim_end_matches('/')
        )
    }

    /// Send the messages and return the first choice's content
    #[instrument(skip(self, messages), fields(model = %self.endpoint.model))]
    pub async fn complete(&self, messages: &[PromptMessage]) -> Result<String, TranslationError> {
        let body = ChatCompletionRequest {
            model: &self.endpoint.model,
            messages,
            temperature: self.endpoint.temperature,
            max_tokens: self.endpoint.max_tokens,
        };

        let mut request = self.client.post(self.url()).json(&body);
        if let Some(key) = &self.endpoint.api_key {
            request = request.bearer_auth(key.expose_secret());
        }
        for (name, value) in &self.endpoint.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        debug!(messages = messages.len(), "Sending chat completion request");

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Chat completion request failed");
            return Err(TranslationError::Provider(format!("Status {status}: {body}")));
        }

        let text = response.text().await?;
        let envelope: ChatCompletionResponse = serde_json::from_str(&text)
            .map_err(|e| TranslationError::Parse(format!("unexpected envelope: {e}")))?;

        envelope
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| TranslationError::Parse("response has no message content".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(base_url: &str) -> ChatEndpoint {
        ChatEndpoint {
            base_url: base_url.to_string(),
            model: "test-model".to_string(),
            api_key: None,
            headers: Vec::new(),
            temperature: 0.4,
            max_tokens: 1000,
            timeout_ms: 5_000,
        }
    }

    #[test]
    fn url_appends_chat_completions() {
        let client = ChatCompletionClient::new(endpoint("https://api.openai.com/v1")).unwrap();
        assert_eq!(client.url(), "https://api.openai.com/v1/chat/completions");
    }

    #[test]
    fn url_tolerates_trailing_slash() {
        let client = ChatCompletionClient::new(endpoint("http://localhost:9000/")).unwrap();
        assert_eq!(client.url(), "http://localhost:9000/chat/completions");
    }

    #[test]
    fn request_body_shape() {
        let messages = [PromptMessage::user("hello")];
        let body = ChatCompletionRequest {
            model: "gpt-3.5-turbo",
            messages: &messages,
            temperature: 0.4,
            max_tokens: 1000,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "gpt-3.5-turbo");
        assert_eq!(json["max_tokens"], 1000);
        assert_eq!(json["messages"][0]["role"], "user");
    }

    #[test]
    fn envelope_without_content_parses_to_none() {
        let envelope: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"role":"assistant"}}]}"#).unwrap();
        assert!(envelope.choices[0].message.content.is_none());
    }
}
