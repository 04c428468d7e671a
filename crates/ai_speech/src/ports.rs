//! Port definitions for speech synthesis
//!
//! Defines the trait that server-side text-to-speech adapters implement.

use async_trait::async_trait;
use domain::{SynthesizedAudio, TeacherVoice};

use crate::{config::SpeechProvider, error::SpeechError};

/// Port for text-to-speech synthesis
///
/// Implementations return WAV audio together with whatever viseme timeline
/// they can provide (possibly empty).
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    /// Synthesize Japanese speech for the given teacher
    async fn synthesize(
        &self,
        text: &str,
        voice: TeacherVoice,
    ) -> Result<SynthesizedAudio, SpeechError>;

    /// Which provider this adapter talks to
    fn provider(&self) -> SpeechProvider;

    /// Whether the adapter has the credentials it needs
    fn is_configured(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{AudioFormat, VisemeTimeline};

    struct SilentTts;

    #[async_trait]
    impl TextToSpeech for SilentTts {
        async fn synthesize(
            &self,
            _text: &str,
            _voice: TeacherVoice,
        ) -> Result<SynthesizedAudio, SpeechError> {
            Ok(SynthesizedAudio {
                data: vec![0; 44],
                format: AudioFormat::Wav,
                visemes: VisemeTimeline::empty(),
            })
        }

        fn provider(&self) -> SpeechProvider {
            SpeechProvider::Lovo
        }

        fn is_configured(&self) -> bool {
            true
        }
    }

    #[tokio::test]
    async fn trait_object_synthesizes() {
        let tts: Box<dyn TextToSpeech> = Box::new(SilentTts);
        let audio = tts.synthesize("こんにちは", TeacherVoice::Nanami).await.unwrap();
        assert_eq!(audio.format, AudioFormat::Wav);
        assert!(audio.visemes.is_empty());
        assert_eq!(tts.provider(), SpeechProvider::Lovo);
    }
}
