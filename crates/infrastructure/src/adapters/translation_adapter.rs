//! Translation adapter - Implements TranslationPort using the ai_core gateway

use std::sync::Arc;

use ai_core::{TranslationError, TranslationGateway};
use application::{error::ApplicationError, ports::TranslationPort};
use async_trait::async_trait;
use domain::{Question, TranslationResult};
use tracing::{debug, instrument};

/// Adapter running the translation gateway in-process
#[derive(Debug, Clone)]
pub struct TranslationGatewayAdapter {
    gateway: Arc<TranslationGateway>,
}

impl TranslationGatewayAdapter {
    pub const fn new(gateway: Arc<TranslationGateway>) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &TranslationGateway {
        &self.gateway
    }

    /// Map translation error to application error
    fn map_error(err: TranslationError) -> ApplicationError {
        match err {
            TranslationError::Provider(e) => ApplicationError::Provider(e),
            TranslationError::Parse(e) => ApplicationError::Parse(e),
            TranslationError::Validation(e) => ApplicationError::Validation(e),
            TranslationError::Configuration(e) => ApplicationError::Configuration(e),
        }
    }
}

#[async_trait]
impl TranslationPort for TranslationGatewayAdapter {
    #[instrument(skip(self, question), fields(register = %question.register))]
    async fn translate(&self, question: &Question) -> Result<TranslationResult, ApplicationError> {
        debug!(provider = ?question.provider, "Translating through local gateway");
        self.gateway
            .translate(
                &question.text,
                question.register,
                question.provider.as_deref(),
            )
            .await
            .map_err(Self::map_error)
    }
}
