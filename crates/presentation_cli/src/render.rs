//! Plain-text rendering of lessons and speech handles

use std::fmt::Write;

use domain::{ClientDirective, Message, SpeechOutput, TranslationResult, Word};

/// What the learner chose to see
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayOptions {
    pub furigana: bool,
    pub english: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            furigana: true,
            english: true,
        }
    }
}

/// A word with its reading in brackets when furigana are on
pub fn word(word: &Word, furigana: bool) -> String {
    match (&word.reading, furigana) {
        (Some(reading), true) => format!("{}[{reading}]", word.word),
        _ => word.word.clone(),
    }
}

fn line(words: &[Word], furigana: bool) -> String {
    words.iter().map(|w| word(w, furigana)).collect()
}

fn romaji(words: &[Word]) -> String {
    words
        .iter()
        .filter_map(|w| w.romaji.as_deref())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Full lesson: sentence, romaji, translation and grammar notes
pub fn lesson(result: &TranslationResult, options: DisplayOptions) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "🇯🇵 {}", line(&result.japanese, options.furigana));

    let romaji_line = romaji(&result.japanese);
    if !romaji_line.is_empty() {
        let _ = writeln!(out, "   {romaji_line}");
    }
    if options.english {
        let _ = writeln!(out, "🇬🇧 {}", result.english);
    }

    for sentence in &result.grammar_breakdown {
        let _ = writeln!(out);
        let _ = writeln!(out, "📖 {}", line(&sentence.japanese, options.furigana));
        for chunk in &sentence.chunks {
            let _ = write!(
                out,
                "   • {}  {}",
                line(&chunk.japanese, options.furigana),
                chunk.grammar
            );
            if options.english {
                let _ = write!(out, " ({})", chunk.meaning);
            }
            let _ = writeln!(out);
        }
    }

    out
}

/// One history entry
pub fn message(message: &Message, options: DisplayOptions, current: bool) -> String {
    let marker = if current { "▶" } else { " " };
    let speech = match &message.speech {
        Some(SpeechOutput::Audio(_)) => "🔊",
        Some(SpeechOutput::ClientDirective(_)) => "🗣",
        None => "  ",
    };
    format!(
        "{marker} #{} {speech} {}  ←  {}",
        message.id,
        line(&message.answer.japanese, options.furigana),
        message.question.text
    )
}

/// What the local platform voice should say
pub fn directive(directive: &ClientDirective) -> String {
    format!(
        "🗣  [{} · {} · rate {} · pitch {}] {}",
        directive.voice, directive.lang, directive.rate, directive.pitch, directive.text
    )
}
