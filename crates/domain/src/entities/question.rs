//! Question entity - what the student asked

use serde::{Deserialize, Serialize};

use crate::value_objects::Register;

/// A student's question, alive for the duration of one translation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Natural-language text to translate
    pub text: String,
    /// Register the answer should use
    pub register: Register,
    /// Translation backend hint (e.g. "openai"); `None` uses the default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

impl Question {
    pub fn new(text: impl Into<String>, register: Register) -> Self {
        Self {
            text: text.into(),
            register,
            provider: None,
        }
    }

    /// Set the translation backend hint
    #[must_use]
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// True when there is nothing to translate
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}
