//! Port definitions for translation backends
//!
//! Both backends speak the OpenAI chat completions dialect; they differ only
//! in endpoint, model and authentication headers.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::TranslationError;

/// Chat role of a prompt message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptRole {
    System,
    User,
    Assistant,
}

/// A message in the chat completion request (OpenAI-compatible format)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: PromptRole,
    pub content: String,
}

impl PromptMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::User,
            content: content.into(),
        }
    }
}

/// The two translation backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BackendKind {
    #[serde(rename = "openai")]
    OpenAi,
    #[serde(rename = "openrouter")]
    OpenRouter,
}

impl BackendKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::OpenRouter => "openrouter",
        }
    }

    /// Route a provider hint to a backend.
    ///
    /// Only an exact `"openai"` hint with a configured OpenAI credential
    /// reaches OpenAI; every other hint, including none, goes to OpenRouter.
    pub fn select(hint: Option<&str>, openai_configured: bool) -> Self {
        match hint {
            Some("openai") if openai_configured => Self::OpenAi,
            _ => Self::OpenRouter,
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A chat completion backend that returns the raw assistant content
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    /// Send the prompt and return `choices[0].message.content`
    async fn complete(&self, messages: &[PromptMessage]) -> Result<String, TranslationError>;

    fn kind(&self) -> BackendKind;

    /// Whether the backend has a usable credential
    fn is_configured(&self) -> bool;
}
