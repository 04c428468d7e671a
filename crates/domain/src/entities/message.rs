//! Message entity - one question/answer turn of the lesson

use chrono::{DateTime, Utc};

use super::{Question, SpeechOutput, TranslationResult, VisemeCue};
use crate::value_objects::MessageId;

/// A conversation turn: the question, its translation and, once
/// synthesized, the speech handle that plays it back
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: MessageId,
    pub question: Question,
    pub answer: TranslationResult,
    /// Owned exclusively by this message once attached
    pub speech: Option<SpeechOutput>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(id: MessageId, question: Question, answer: TranslationResult) -> Self {
        Self {
            id,
            question,
            answer,
            speech: None,
            created_at: Utc::now(),
        }
    }

    /// Text sent to speech synthesis
    pub fn spoken_text(&self) -> String {
        self.answer.spoken_text()
    }

    pub fn has_speech(&self) -> bool {
        self.speech.is_some()
    }

    pub fn attach_speech(&mut self, speech: SpeechOutput) {
        self.speech = Some(speech);
    }

    /// Drop the handle so the next playback re-synthesizes
    pub fn clear_speech(&mut self) {
        self.speech = None;
    }

    pub fn visemes(&self) -> &[VisemeCue] {
        self.speech.as_ref().map_or(&[], SpeechOutput::visemes)
    }
}
