//! Speech output - the playable handle attached to a message
//!
//! A message is spoken either from synthesized audio (with an optional
//! viseme timeline for lip-sync) or by the presentation layer's own
//! platform voice, described by a [`ClientDirective`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Morph target driven by a viseme: a numeric viseme id or a named blend shape
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MorphTarget {
    Index(u32),
    Name(String),
}

impl fmt::Display for MorphTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{i}"),
            Self::Name(n) => f.write_str(n),
        }
    }
}

/// A timestamped mouth shape; serialized as `[timestampMillis, morphTargetKey]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(u64, MorphTarget)", into = "(u64, MorphTarget)")]
pub struct VisemeCue {
    /// Offset from the start of playback
    pub at_ms: u64,
    pub target: MorphTarget,
}

impl VisemeCue {
    pub const fn index(at_ms: u64, viseme_id: u32) -> Self {
        Self {
            at_ms,
            target: MorphTarget::Index(viseme_id),
        }
    }
}

impl From<(u64, MorphTarget)> for VisemeCue {
    fn from((at_ms, target): (u64, MorphTarget)) -> Self {
        Self { at_ms, target }
    }
}

impl From<VisemeCue> for (u64, MorphTarget) {
    fn from(cue: VisemeCue) -> Self {
        (cue.at_ms, cue.target)
    }
}

/// Viseme cues sorted ascending by timestamp
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<VisemeCue>", into = "Vec<VisemeCue>")]
pub struct VisemeTimeline(Vec<VisemeCue>);

impl VisemeTimeline {
    /// Build a timeline; cues are stably sorted by timestamp
    pub fn new(mut cues: Vec<VisemeCue>) -> Self {
        cues.sort_by_key(|c| c.at_ms);
        Self(cues)
    }

    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    /// The cue that should be showing `elapsed_ms` into playback
    pub fn active_at(&self, elapsed_ms: u64) -> Option<&VisemeCue> {
        let upto = self.0.partition_point(|c| c.at_ms <= elapsed_ms);
        upto.checked_sub(1).map(|i| &self.0[i])
    }

    pub fn cues(&self) -> &[VisemeCue] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Timestamp of the last cue
    pub fn last_at_ms(&self) -> Option<u64> {
        self.0.last().map(|c| c.at_ms)
    }
}

impl From<Vec<VisemeCue>> for VisemeTimeline {
    fn from(cues: Vec<VisemeCue>) -> Self {
        Self::new(cues)
    }
}

impl From<VisemeTimeline> for Vec<VisemeCue> {
    fn from(timeline: VisemeTimeline) -> Self {
        timeline.0
    }
}

/// Container format of synthesized audio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    #[default]
    Wav,
    Mp3,
}

impl AudioFormat {
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Wav => "audio/wav",
            Self::Mp3 => "audio/mpeg",
        }
    }

    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::Mp3 => "mp3",
        }
    }
}

/// Audio produced by a remote speech backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedAudio {
    pub data: Vec<u8>,
    pub format: AudioFormat,
    pub visemes: VisemeTimeline,
}

/// Instruction to speak with the local platform voice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientDirective {
    pub text: String,
    pub voice: String,
    /// BCP-47 language tag
    pub lang: String,
    pub rate: f32,
    pub pitch: f32,
}

impl ClientDirective {
    /// Japanese platform speech at normal rate and pitch
    pub fn japanese(text: impl Into<String>, voice: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice: voice.into(),
            lang: "ja-JP".to_string(),
            rate: 1.0,
            pitch: 1.0,
        }
    }
}

/// Playable handle: remote audio or a client-side directive
#[derive(Debug, Clone, PartialEq)]
pub enum SpeechOutput {
    Audio(SynthesizedAudio),
    ClientDirective(ClientDirective),
}

impl SpeechOutput {
    pub fn is_audio(&self) -> bool {
        matches!(self, Self::Audio(_))
    }

    /// Lip-sync cues; empty for client directives
    pub fn visemes(&self) -> &[VisemeCue] {
        match self {
            Self::Audio(audio) => audio.visemes.cues(),
            Self::ClientDirective(_) => &[],
        }
    }

    /// Short label for logs
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Audio(_) => "audio",
            Self::ClientDirective(_) => "clientDirective",
        }
    }
}
