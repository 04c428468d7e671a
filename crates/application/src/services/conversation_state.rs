//! Conversation state store
//!
//! Holds one lesson session: the message history, which message is being
//! spoken, the teacher and classroom, the register and display toggles.
//! All mutation goes through the methods here.
//!
//! `ask` runs translation, then synthesis, then playback, strictly in that
//! order. While an `ask` or `play` is running a second one is rejected with
//! [`ApplicationError::Busy`] instead of interleaving with the first.
//! A `stop` for the message an operation is still synthesizing cancels the
//! playback that would otherwise follow; the handle is kept for replay.
//!
//! The state lock is never held across an `.await`.

use std::{fmt, sync::Arc};

use domain::{
    AvatarAnimation, Classroom, Message, MessageId, Question, Register, SpeechOutput,
    TeacherVoice,
};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::{PlaybackPort, SpeechPort, TranslationPort},
};

/// Display options the presentation can toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayToggle {
    /// Kana readings above kanji
    Furigana,
    /// English source sentence
    English,
}

/// The operation currently holding the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InFlight {
    Asking,
    Playing(MessageId),
}

impl fmt::Display for InFlight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asking => f.write_str("ask"),
            Self::Playing(id) => write!(f, "play of message {id}"),
        }
    }
}

/// Provider hints forwarded with every request; `None` lets the gateway
/// use its configured default
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderPreferences {
    pub translation: Option<String>,
    pub speech: Option<String>,
}

/// Read-only copy of the session
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationSnapshot {
    pub messages: Vec<Message>,
    pub current_message: Option<MessageId>,
    pub teacher: TeacherVoice,
    pub classroom: Classroom,
    pub register: Register,
    pub show_furigana: bool,
    pub show_english: bool,
    pub loading: bool,
    pub in_flight: Option<InFlight>,
}

impl ConversationSnapshot {
    /// Animation the avatar should be in
    pub const fn animation(&self) -> AvatarAnimation {
        AvatarAnimation::derive(self.loading, self.current_message.is_some())
    }

    pub fn message(&self, id: MessageId) -> Option<&Message> {
        self.messages.get(id.position())
    }

    pub fn current(&self) -> Option<&Message> {
        self.current_message.and_then(|id| self.message(id))
    }
}

#[derive(Debug)]
struct ConversationState {
    messages: Vec<Message>,
    current_message: Option<MessageId>,
    teacher: TeacherVoice,
    classroom: Classroom,
    register: Register,
    show_furigana: bool,
    show_english: bool,
    loading: bool,
    in_flight: Option<InFlight>,
    stop_requested: Option<MessageId>,
}

impl Default for ConversationState {
    fn default() -> Self {
        Self {
            messages: Vec::new(),
            current_message: None,
            teacher: TeacherVoice::default(),
            classroom: Classroom::default(),
            register: Register::default(),
            show_furigana: true,
            show_english: true,
            loading: false,
            in_flight: None,
            stop_requested: None,
        }
    }
}

impl ConversationState {
    fn snapshot(&self) -> ConversationSnapshot {
        ConversationSnapshot {
            messages: self.messages.clone(),
            current_message: self.current_message,
            teacher: self.teacher,
            classroom: self.classroom,
            register: self.register,
            show_furigana: self.show_furigana,
            show_english: self.show_english,
            loading: self.loading,
            in_flight: self.in_flight,
        }
    }

    fn message_mut(&mut self, id: MessageId) -> Option<&mut Message> {
        self.messages.get_mut(id.position())
    }

    /// Claim the session for an operation
    fn begin(&mut self, op: InFlight) -> Result<(), ApplicationError> {
        if let Some(running) = self.in_flight {
            return Err(ApplicationError::Busy(running.to_string()));
        }
        self.in_flight = Some(op);
        self.stop_requested = None;
        Ok(())
    }
}

/// Releases the session when an operation ends, including on early return
/// or when the future is dropped mid-flight.
struct InFlightGuard<'a> {
    state: &'a Mutex<ConversationState>,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock();
        state.in_flight = None;
        state.loading = false;
    }
}

/// Session state plus the ports the lesson flow drives
pub struct ConversationStateStore {
    state: Mutex<ConversationState>,
    translation: Arc<dyn TranslationPort>,
    speech: Arc<dyn SpeechPort>,
    playback: Arc<dyn PlaybackPort>,
    providers: ProviderPreferences,
}

impl fmt::Debug for ConversationStateStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversationStateStore")
            .field("state", &*self.state.lock())
            .field("providers", &self.providers)
            .finish_non_exhaustive()
    }
}

impl ConversationStateStore {
    /// Create a fresh session
    pub fn new(
        translation: Arc<dyn TranslationPort>,
        speech: Arc<dyn SpeechPort>,
        playback: Arc<dyn PlaybackPort>,
    ) -> Self {
        Self {
            state: Mutex::new(ConversationState::default()),
            translation,
            speech,
            playback,
            providers: ProviderPreferences::default(),
        }
    }

    /// Set the provider hints sent with each request
    #[must_use]
    pub fn with_providers(mut self, providers: ProviderPreferences) -> Self {
        self.providers = providers;
        self
    }

    pub fn providers(&self) -> &ProviderPreferences {
        &self.providers
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> ConversationSnapshot {
        self.state.lock().snapshot()
    }

    /// Ask a question: translate, append, synthesize, play.
    ///
    /// Blank questions are ignored and return `Ok(None)`. On translation
    /// failure nothing is appended and the error is returned.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn ask(&self, text: &str) -> Result<Option<MessageId>, ApplicationError> {
        if text.trim().is_empty() {
            debug!("Ignoring blank question");
            return Ok(None);
        }

        let question = {
            let mut state = self.state.lock();
            state.begin(InFlight::Asking)?;
            state.loading = true;
            let question = Question::new(text, state.register);
            match &self.providers.translation {
                Some(provider) => question.with_provider(provider),
                None => question,
            }
        };
        let _guard = InFlightGuard { state: &self.state };

        let answer = match self.translation.translate(&question).await {
            Ok(answer) => answer,
            Err(e) => {
                warn!(error = %e, "Translation failed");
                self.state.lock().loading = false;
                return Err(e);
            },
        };

        let id = {
            let mut state = self.state.lock();
            let id = MessageId::new(state.messages.len());
            state.messages.push(Message::new(id, question, answer));
            state.loading = false;
            id
        };

        info!(message_id = %id, "Message appended");

        let speech = self.synthesize_for(id).await?;
        self.start_playback(id, &speech).await?;

        Ok(Some(id))
    }

    /// Play a message, synthesizing it first if it has no handle yet
    #[instrument(skip(self), fields(message_id = %id))]
    pub async fn play(&self, id: MessageId) -> Result<(), ApplicationError> {
        let existing = {
            let mut state = self.state.lock();
            let speech = state
                .messages
                .get(id.position())
                .ok_or_else(|| ApplicationError::not_found("Message", id))?
                .speech
                .clone();
            state.begin(InFlight::Playing(id))?;
            state.current_message = Some(id);
            speech
        };
        let _guard = InFlightGuard { state: &self.state };

        let speech = match existing {
            Some(speech) => {
                debug!("Replaying existing speech");
                speech
            },
            None => self.synthesize_for(id).await?,
        };

        self.start_playback(id, &speech).await
    }

    /// Stop whatever is playing; always leaves no current message.
    ///
    /// If `id` is still being synthesized, its playback never starts.
    #[instrument(skip(self), fields(message_id = %id))]
    pub fn stop(&self, id: MessageId) {
        self.playback.cancel();
        let mut state = self.state.lock();
        state.current_message = None;
        if state.in_flight.is_some() {
            state.stop_requested = Some(id);
        }
        debug!("Playback stopped");
    }

    /// Playback of a message ran to the end
    pub fn on_playback_finished(&self, id: MessageId) {
        let mut state = self.state.lock();
        if state.current_message == Some(id) {
            state.current_message = None;
        }
    }

    /// Switch teacher; existing handles belong to the old voice and are dropped
    pub fn set_voice(&self, voice: TeacherVoice) {
        let mut state = self.state.lock();
        state.teacher = voice;
        for message in &mut state.messages {
            message.clear_speech();
        }
        debug!(voice = %voice, "Teacher changed");
    }

    pub fn set_register(&self, register: Register) {
        self.state.lock().register = register;
    }

    pub fn set_classroom(&self, classroom: Classroom) {
        self.state.lock().classroom = classroom;
    }

    pub fn set_display_toggle(&self, toggle: DisplayToggle, value: bool) {
        let mut state = self.state.lock();
        match toggle {
            DisplayToggle::Furigana => state.show_furigana = value,
            DisplayToggle::English => state.show_english = value,
        }
    }

    /// Synthesize the message's spoken text and attach the handle
    async fn synthesize_for(&self, id: MessageId) -> Result<SpeechOutput, ApplicationError> {
        let (text, voice) = {
            let mut state = self.state.lock();
            let voice = state.teacher;
            let message = state
                .message_mut(id)
                .ok_or_else(|| ApplicationError::not_found("Message", id))?;
            let text = message.spoken_text();
            state.loading = true;
            (text, voice)
        };

        let result = self
            .speech
            .synthesize(&text, voice, self.providers.speech.clone())
            .await;

        let mut state = self.state.lock();
        state.loading = false;
        let speech = result.inspect_err(|e| warn!(error = %e, "Speech synthesis failed"))?;

        if let Some(message) = state.message_mut(id) {
            message.attach_speech(speech.clone());
        }
        debug!(kind = speech.kind(), visemes = speech.visemes().len(), "Speech attached");
        Ok(speech)
    }

    async fn start_playback(
        &self,
        id: MessageId,
        speech: &SpeechOutput,
    ) -> Result<(), ApplicationError> {
        {
            let mut state = self.state.lock();
            if state.stop_requested.take() == Some(id) {
                debug!("Stopped before playback started");
                return Ok(());
            }
            state.current_message = Some(id);
        }
        self.playback.play(id, speech).await
    }
}
