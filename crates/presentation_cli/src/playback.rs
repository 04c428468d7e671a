//! Terminal playback
//!
//! A terminal cannot lip-sync, so audio handles are saved to disk for an
//! external player and client directives are printed for the learner to
//! read aloud (or pipe into a local TTS).

#![allow(clippy::print_stdout)]

use std::path::{Path, PathBuf};

use application::{error::ApplicationError, ports::PlaybackPort};
use async_trait::async_trait;
use domain::{MessageId, SpeechOutput, SynthesizedAudio};
use parking_lot::Mutex;
use tracing::{debug, instrument};

use crate::render;

/// Write audio to `dir/name.<ext>`, creating the directory if needed
pub async fn save_audio(
    dir: &Path,
    name: &str,
    audio: &SynthesizedAudio,
) -> std::io::Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(format!("{name}.{}", audio.format.extension()));
    tokio::fs::write(&path, &audio.data).await?;
    Ok(path)
}

/// Playback port for terminal sessions
#[derive(Debug)]
pub struct TerminalPlayback {
    output_dir: PathBuf,
    last_file: Mutex<Option<PathBuf>>,
}

impl TerminalPlayback {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            last_file: Mutex::new(None),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Most recently written audio file
    pub fn last_file(&self) -> Option<PathBuf> {
        self.last_file.lock().clone()
    }
}

#[async_trait]
impl PlaybackPort for TerminalPlayback {
    #[instrument(skip(self, speech), fields(message_id = %message_id, kind = speech.kind()))]
    async fn play(
        &self,
        message_id: MessageId,
        speech: &SpeechOutput,
    ) -> Result<(), ApplicationError> {
        match speech {
            SpeechOutput::Audio(audio) => {
                let path = save_audio(&self.output_dir, &format!("message-{message_id}"), audio)
                    .await
                    .map_err(|e| ApplicationError::Playback(format!("cannot save audio: {e}")))?;

                println!(
                    "🔊 {} ({} bytes, {} visemes)",
                    path.display(),
                    audio.data.len(),
                    audio.visemes.len()
                );
                debug!(path = %path.display(), "Audio saved");
                *self.last_file.lock() = Some(path);
            },
            SpeechOutput::ClientDirective(directive) => {
                println!("{}", render::directive(directive));
            },
        }
        Ok(())
    }

    fn cancel(&self) {
        debug!("Nothing is speaking in the terminal");
    }
}

#[cfg(test)]
mod tests {
    use domain::{AudioFormat, ClientDirective, VisemeCue, VisemeTimeline};

    use super::*;

    #[tokio::test]
    async fn audio_is_written_to_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let playback = TerminalPlayback::new(dir.path().join("audio"));

        let speech = SpeechOutput::Audio(SynthesizedAudio {
            data: vec![1, 2, 3],
            format: AudioFormat::Wav,
            visemes: VisemeTimeline::new(vec![VisemeCue::index(0, 2)]),
        });
        playback.play(MessageId::new(4), &speech).await.unwrap();

        let path = playback.last_file().unwrap();
        assert_eq!(path.file_name().unwrap(), "message-4.wav");
        assert_eq!(std::fs::read(path).unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn directive_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let playback = TerminalPlayback::new(dir.path());

        let speech = SpeechOutput::ClientDirective(ClientDirective::japanese("はい", "Nanami"));
        playback.play(MessageId::new(0), &speech).await.unwrap();

        assert!(playback.last_file().is_none());
    }

    #[tokio::test]
    async fn mp3_uses_mp3_extension() {
        let dir = tempfile::tempdir().unwrap();
        let audio = SynthesizedAudio {
            data: vec![0xFF],
            format: AudioFormat::Mp3,
            visemes: VisemeTimeline::empty(),
        };
        let path = save_audio(dir.path(), "clip", &audio).await.unwrap();
        assert!(path.ends_with("clip.mp3"));
    }
}
