//! AI Core - Translation gateway
//!
//! Turns an English question into a structured Japanese lesson by asking one
//! of two interchangeable OpenAI-compatible chat backends:
//! - OpenAI (used only when requested and a key is configured)
//! - OpenRouter (everything else)
//!
//! Both receive the same three-part prompt and must answer with the same JSON
//! shape, which is decoded strictly into a [`domain::TranslationResult`].

pub mod backends;
pub mod chat_client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod ports;
pub mod prompt;

pub use backends::{OpenAiBackend, OpenRouterBackend};
pub use config::{OpenAiConfig, OpenRouterConfig, TranslationConfig};
pub use error::TranslationError;
pub use gateway::TranslationGateway;
pub use ports::{BackendKind, PromptMessage, TranslationBackend};
