//! Playback port - Side effect that makes a speech handle audible

use async_trait::async_trait;
use domain::{MessageId, SpeechOutput};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for starting and cancelling playback
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PlaybackPort: Send + Sync {
    /// Start playing the handle of a message
    async fn play(&self, message_id: MessageId, speech: &SpeechOutput)
    -> Result<(), ApplicationError>;

    /// Cancel client-side speech, if any is running
    fn cancel(&self);
}
