//! Speech port - Interface for vocalizing Japanese text

use async_trait::async_trait;
use domain::{SpeechOutput, TeacherVoice};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for speech synthesis
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SpeechPort: Send + Sync {
    /// Produce a playable handle for `text`
    ///
    /// Backend or transport trouble degrades to a client directive inside
    /// the adapter; errors are reserved for invalid input.
    async fn synthesize(
        &self,
        text: &str,
        voice: TeacherVoice,
        provider: Option<String>,
    ) -> Result<SpeechOutput, ApplicationError>;
}
