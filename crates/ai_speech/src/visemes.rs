//! Viseme estimation
//!
//! The Azure REST endpoint returns audio only, so the lip-sync timeline is
//! estimated from the text: every kana maps to the Azure viseme id of its
//! vowel, and the cues are spread evenly over the audio duration.
//!
//! Azure viseme ids used here:
//!
//! | id | mouth shape |
//! |----|-------------|
//! | 0  | silence |
//! | 2  | open "a" |
//! | 4  | "e" |
//! | 6  | "i" |
//! | 7  | rounded "u" |
//! | 8  | "o" |
//! | 19 | tongue stop (っ) |
//! | 21 | closed lips (ん) |

use std::io::Cursor;

use domain::{VisemeCue, VisemeTimeline};

use crate::error::SpeechError;

/// Lips at rest
pub const SILENCE: u32 = 0;
/// Used for kanji, latin letters and anything else that is voiced
pub const OPEN_MOUTH: u32 = 2;

const VOWEL_A: u32 = 2;
const VOWEL_I: u32 = 6;
const VOWEL_U: u32 = 7;
const VOWEL_E: u32 = 4;
const VOWEL_O: u32 = 8;
const CLOSED_LIPS: u32 = 21;
const STOP: u32 = 19;

const ROW_A: &str = "あかさたなはまやらわがざだばぱぁゃゎ";
const ROW_I: &str = "いきしちにひみりぎじぢびぴぃゐ";
const ROW_U: &str = "うくすつぬふむゆるぐずづぶぷぅゅゔ";
const ROW_E: &str = "えけせてねへめれげぜでべぺぇゑ";
const ROW_O: &str = "おこそとのほもよろをごぞどぼぽぉょ";

/// Fold katakana onto the hiragana block
fn to_hiragana(c: char) -> char {
    match c {
        'ァ'..='ヶ' => char::from_u32(u32::from(c) - 0x60).unwrap_or(c),
        _ => c,
    }
}

fn is_pause(c: char) -> bool {
    c.is_whitespace()
        || c.is_ascii_punctuation()
        || matches!(
            c,
            '、' | '。' | '？' | '！' | '・' | '「' | '」' | '『' | '』' | '（' | '）' | '…'
        )
}

/// Azure viseme id for a single character
pub fn viseme_for(c: char) -> u32 {
    if is_pause(c) {
        return SILENCE;
    }

    let kana = to_hiragana(c);
    match kana {
        'ん' => CLOSED_LIPS,
        'っ' => STOP,
        _ if ROW_A.contains(kana) => VOWEL_A,
        _ if ROW_I.contains(kana) => VOWEL_I,
        _ if ROW_U.contains(kana) => VOWEL_U,
        _ if ROW_E.contains(kana) => VOWEL_E,
        _ if ROW_O.contains(kana) => VOWEL_O,
        _ => OPEN_MOUTH,
    }
}

/// Spread one cue per character over `duration_ms`, closing with silence.
///
/// Whitespace only separates words and takes no time. Consecutive identical
/// shapes are merged. The final cue is always silence at `duration_ms`.
pub fn estimate_timeline(text: &str, duration_ms: u64) -> VisemeTimeline {
    let ids: Vec<u32> = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(viseme_for)
        .collect();

    if ids.is_empty() {
        return VisemeTimeline::new(vec![VisemeCue::index(0, SILENCE)]);
    }

    let slots = ids.len() as u64;
    let mut cues = Vec::with_capacity(ids.len() + 1);
    let mut previous = None;

    for (slot, id) in (0_u64..).zip(ids) {
        if previous == Some(id) {
            continue;
        }
        cues.push(VisemeCue::index(slot * duration_ms / slots, id));
        previous = Some(id);
    }

    cues.push(VisemeCue::index(duration_ms, SILENCE));
    VisemeTimeline::new(cues)
}

/// Playback length of a WAV file in milliseconds
pub fn wav_duration_ms(bytes: &[u8]) -> Result<u64, SpeechError> {
    let reader = hound::WavReader::new(Cursor::new(bytes))?;
    let spec = reader.spec();
    if spec.sample_rate == 0 {
        return Err(SpeechError::InvalidAudio("sample rate is zero".to_string()));
    }
    Ok(u64::from(reader.duration()) * 1000 / u64::from(spec.sample_rate))
}
