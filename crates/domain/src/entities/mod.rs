//! Domain entities - Objects with identity and lifecycle

mod message;
mod presentation;
mod question;
mod speech;
mod translation;

pub use message::Message;
pub use presentation::{AvatarAnimation, thinking_indicator};
pub use question::Question;
pub use speech::{
    AudioFormat, ClientDirective, MorphTarget, SpeechOutput, SynthesizedAudio, VisemeCue,
    VisemeTimeline,
};
pub use translation::{GrammarChunk, SentenceBreakdown, TranslationResult, Word};
