//! Translation result - structured answer produced by the language model
//!
//! The top-level `japanese` words and each `grammarBreakdown[i].japanese`
//! carry the same surface text. The duplication is kept because the two are
//! rendered independently (the sentence strip and the breakdown board).

use serde::{Deserialize, Deserializer, Serialize};

/// One word of a Japanese sentence with optional phonetic aids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    /// Surface form as written
    pub word: String,
    /// Kana reading, present only when the word is not already phonetic
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub reading: Option<String>,
    /// Latin transliteration
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub romaji: Option<String>,
}

/// Models answer `"reading": ""` for kana-only words; treat that as absent.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

impl Word {
    /// A word that needs no reading (kana or punctuation)
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            reading: None,
            romaji: None,
        }
    }

    /// A word with a kana reading
    pub fn with_reading(word: impl Into<String>, reading: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            reading: Some(reading.into()),
            romaji: None,
        }
    }

    #[must_use]
    pub fn romaji(mut self, romaji: impl Into<String>) -> Self {
        self.romaji = Some(romaji.into());
        self
    }

    /// Whether the surface form is already phonetic
    pub fn is_phonetic(&self) -> bool {
        self.reading.is_none()
    }
}

/// A grammatical unit inside a sentence breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarChunk {
    pub japanese: Vec<Word>,
    /// English gloss of the chunk
    pub meaning: String,
    /// Grammatical role label, e.g. "Particle" or "Verb + て form + います"
    pub grammar: String,
}

/// Per-sentence explanation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceBreakdown {
    #[serde(default)]
    pub english: String,
    pub japanese: Vec<Word>,
    pub chunks: Vec<GrammarChunk>,
}

impl SentenceBreakdown {
    /// Surface text of this sentence
    pub fn surface(&self) -> String {
        surface_of(&self.japanese)
    }

    /// Whether the chunks, read in order, spell out the sentence
    pub fn chunks_cover_sentence(&self) -> bool {
        let chunked: String = self.chunks.iter().map(|c| surface_of(&c.japanese)).collect();
        strip_whitespace(&chunked) == strip_whitespace(&self.surface())
    }
}

/// Structured translation with grammar annotations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResult {
    /// Source sentence
    pub english: String,
    /// Word-by-word translation
    pub japanese: Vec<Word>,
    /// One entry per sentence
    pub grammar_breakdown: Vec<SentenceBreakdown>,
}

impl TranslationResult {
    /// Text handed to speech synthesis: every word, space-joined, in order
    pub fn spoken_text(&self) -> String {
        self.japanese
            .iter()
            .map(|w| w.word.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Surface text of the whole translation
    pub fn surface(&self) -> String {
        surface_of(&self.japanese)
    }

    /// Check that the breakdown sentences reconstruct the top-level words
    pub fn is_consistent(&self) -> bool {
        let breakdown: String = self
            .grammar_breakdown
            .iter()
            .map(SentenceBreakdown::surface)
            .collect();
        strip_whitespace(&breakdown) == strip_whitespace(&self.surface())
    }

    pub fn sentence_count(&self) -> usize {
        self.grammar_breakdown.len()
    }
}

fn surface_of(words: &[Word]) -> String {
    words.iter().map(|w| w.word.as_str()).collect()
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}
