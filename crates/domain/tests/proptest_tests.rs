//! Property-based tests for domain entities
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::{
    GrammarChunk, MorphTarget, Register, SentenceBreakdown, TranslationResult, VisemeCue,
    VisemeTimeline, Word,
};
use proptest::prelude::*;

fn word_strategy() -> impl Strategy<Value = Word> {
    ("[ぁ-ゖ一-龠]{1,4}", proptest::option::of("[ぁ-ゖ]{1,6}")).prop_map(|(w, reading)| Word {
        word: w,
        reading,
        romaji: None,
    })
}

fn sentence_strategy() -> impl Strategy<Value = Vec<Word>> {
    proptest::collection::vec(word_strategy(), 1..8)
}

/// A translation whose breakdown mirrors its sentences, as the model is told to produce
fn translation_from(sentences: Vec<Vec<Word>>) -> TranslationResult {
    let japanese: Vec<Word> = sentences.iter().flatten().cloned().collect();
    let grammar_breakdown = sentences
        .into_iter()
        .map(|words| SentenceBreakdown {
            english: String::new(),
            chunks: words
                .iter()
                .map(|w| GrammarChunk {
                    japanese: vec![w.clone()],
                    meaning: String::new(),
                    grammar: "Noun".to_string(),
                })
                .collect(),
            japanese: words,
        })
        .collect();
    TranslationResult {
        english: String::new(),
        japanese,
        grammar_breakdown,
    }
}

// ============================================================================
// Translation invariants
// ============================================================================

mod translation_tests {
    use super::*;

    proptest! {
        #[test]
        fn mirrored_breakdown_is_consistent(
            sentences in proptest::collection::vec(sentence_strategy(), 1..4)
        ) {
            let t = translation_from(sentences);
            prop_assert!(t.is_consistent());
            for sentence in &t.grammar_breakdown {
                prop_assert!(sentence.chunks_cover_sentence());
            }
        }

        #[test]
        fn spoken_text_has_one_token_per_word(sentence in sentence_strategy()) {
            let t = translation_from(vec![sentence.clone()]);
            let spoken = t.spoken_text();
            let tokens: Vec<&str> = spoken.split(' ').collect();
            prop_assert_eq!(tokens.len(), sentence.len());
            for (token, word) in tokens.iter().zip(&sentence) {
                prop_assert_eq!(*token, word.word.as_str());
            }
        }

        #[test]
        fn dropping_a_breakdown_word_breaks_consistency(sentence in sentence_strategy()) {
            let mut t = translation_from(vec![sentence]);
            t.grammar_breakdown[0].japanese.pop();
            prop_assert!(!t.is_consistent());
        }

        #[test]
        fn translation_survives_json(sentences in proptest::collection::vec(sentence_strategy(), 1..3)) {
            let t = translation_from(sentences);
            let json = serde_json::to_string(&t).unwrap();
            let back: TranslationResult = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(back, t);
        }
    }
}

// ============================================================================
// Viseme timeline invariants
// ============================================================================

mod viseme_tests {
    use super::*;

    proptest! {
        #[test]
        fn timeline_is_sorted(stamps in proptest::collection::vec(0u64..10_000, 0..40)) {
            let cues = stamps.iter().map(|&ms| VisemeCue::index(ms, 1)).collect();
            let timeline = VisemeTimeline::new(cues);
            prop_assert!(timeline.cues().windows(2).all(|w| w[0].at_ms <= w[1].at_ms));
            prop_assert_eq!(timeline.len(), stamps.len());
        }

        #[test]
        fn active_cue_never_starts_in_the_future(
            stamps in proptest::collection::vec(0u64..10_000, 1..40),
            now in 0u64..12_000
        ) {
            let cues = stamps.iter().enumerate().map(|(i, &ms)| VisemeCue {
                at_ms: ms,
                target: MorphTarget::Index(u32::try_from(i % 22).unwrap()),
            }).collect();
            let timeline = VisemeTimeline::new(cues);
            match timeline.active_at(now) {
                Some(cue) => {
                    prop_assert!(cue.at_ms <= now);
                    prop_assert!(timeline.cues().iter().all(|c| c.at_ms <= cue.at_ms || c.at_ms > now));
                },
                None => prop_assert!(timeline.cues().iter().all(|c| c.at_ms > now)),
            }
        }
    }
}

// ============================================================================
// Register parsing
// ============================================================================

mod register_tests {
    use super::*;

    proptest! {
        #[test]
        fn unknown_registers_rejected(s in "[a-z]{1,12}") {
            prop_assume!(s != "formal" && s != "casual");
            prop_assert!(s.parse::<Register>().is_err());
        }
    }
}
