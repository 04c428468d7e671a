//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod playback_port;
mod speech_port;
mod translation_port;

#[cfg(test)]
pub use playback_port::MockPlaybackPort;
pub use playback_port::PlaybackPort;
#[cfg(test)]
pub use speech_port::MockSpeechPort;
pub use speech_port::SpeechPort;
#[cfg(test)]
pub use translation_port::MockTranslationPort;
pub use translation_port::TranslationPort;
