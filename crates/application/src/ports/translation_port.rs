//! Translation port - Interface for the English to Japanese lesson generator

use async_trait::async_trait;
use domain::{Question, TranslationResult};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for translation operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TranslationPort: Send + Sync {
    /// Translate a question in its register, honouring its provider hint
    ///
    /// Fails with [`ApplicationError::Provider`] when the backend cannot be
    /// reached and [`ApplicationError::Parse`] when its reply is malformed.
    async fn translate(&self, question: &Question) -> Result<TranslationResult, ApplicationError>;
}
