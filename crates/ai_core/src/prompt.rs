//! Lesson prompt construction
//!
//! Every translation request carries three messages: a role-setting system
//! message with a worked example in the requested register, a system message
//! restating the JSON shape, and the user's question.

use domain::{GrammarChunk, Register, SentenceBreakdown, TranslationResult, Word};

use crate::{error::TranslationError, ports::PromptMessage};

/// Question asked when the caller supplies none
pub const DEFAULT_QUESTION: &str = "Have you ever been to Japan?";

const EXAMPLE_ENGLISH: &str = "Do you live in Japan?";

const RESPONSE_SHAPE: &str = r#"You always respond with a JSON object with the following format:
{
  "english": "",
  "japanese": [{
    "word": "",
    "reading": ""
  }],
  "grammarBreakdown": [{
    "english": "",
    "japanese": [{
      "word": "",
      "reading": ""
    }],
    "chunks": [{
      "japanese": [{
        "word": "",
        "reading": ""
      }],
      "meaning": "",
      "grammar": ""
    }]
  }]
}"#;

/// "Do you live in Japan?" in the given register
pub fn worked_example(register: Register) -> TranslationResult {
    let (auxiliary, ending) = match register {
        Register::Formal => ("います", "か"),
        Register::Casual => ("いる", "の"),
    };

    let sentence = vec![
        Word::with_reading("日本", "にほん"),
        Word::new("に"),
        Word::with_reading("住んで", "すんで"),
        Word::new(auxiliary),
        Word::new(ending),
        Word::new("?"),
    ];

    let chunks = vec![
        chunk(vec![Word::with_reading("日本", "にほん")], "Japan", "Noun"),
        chunk(vec![Word::new("に")], "in", "Particle"),
        chunk(
            vec![Word::with_reading("住んで", "すんで"), Word::new(auxiliary)],
            "live",
            &format!("Verb + て form + {auxiliary}"),
        ),
        chunk(vec![Word::new(ending)], "question", "Particle"),
        chunk(vec![Word::new("?")], "question", "Punctuation"),
    ];

    TranslationResult {
        english: EXAMPLE_ENGLISH.to_string(),
        japanese: sentence.clone(),
        grammar_breakdown: vec![SentenceBreakdown {
            english: EXAMPLE_ENGLISH.to_string(),
            japanese: sentence,
            chunks,
        }],
    }
}

fn chunk(japanese: Vec<Word>, meaning: &str, grammar: &str) -> GrammarChunk {
    GrammarChunk {
        japanese,
        meaning: meaning.to_string(),
        grammar: grammar.to_string(),
    }
}

/// Build the three-message lesson prompt
pub fn build_prompt(
    question: &str,
    register: Register,
) -> Result<Vec<PromptMessage>, TranslationError> {
    let example = worked_example(register);
    let words = serde_json::to_string(&example.japanese)
        .map_err(|e| TranslationError::Configuration(format!("example encoding: {e}")))?;
    let breakdown = serde_json::to_string(&example.grammar_breakdown)
        .map_err(|e| TranslationError::Configuration(format!("example encoding: {e}")))?;

    let role = format!(
        "You are a Japanese language teacher.\n\
         Your student asks you how to say something from english to japanese.\n\
         You should respond with:\n\
         - english: the english version ex: \"{EXAMPLE_ENGLISH}\"\n\
         - japanese: the japanese translation in split into words ex: {words}\n\
         - grammarBreakdown: an explanation of the grammar structure per sentence ex: {breakdown}\n"
    );

    Ok(vec![
        PromptMessage::system(role),
        PromptMessage::system(RESPONSE_SHAPE),
        PromptMessage::user(user_question(question, register)),
    ])
}

/// The user turn of the prompt
pub fn user_question(question: &str, register: Register) -> String {
    format!("How to say {question} in Japanese in {register} speech?")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::PromptRole;

    #[test]
    fn formal_example_ends_with_ka() {
        let example = worked_example(Register::Formal);
        let words: Vec<_> = example.japanese.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(words, ["日本", "に", "住んで", "います", "か", "?"]);
        assert!(example.is_consistent());
    }

    #[test]
    fn casual_example_ends_with_no() {
        let example = worked_example(Register::Casual);
        assert_eq!(example.spoken_text(), "日本 に 住んで いる の ?");
        assert_eq!(
            example.grammar_breakdown[0].chunks[2].grammar,
            "Verb + て form + いる"
        );
    }

    #[test]
    fn example_chunks_cover_sentence() {
        for register in [Register::Formal, Register::Casual] {
            let example = worked_example(register);
            assert!(example.grammar_breakdown[0].chunks_cover_sentence());
        }
    }

    #[test]
    fn prompt_has_two_system_messages_then_user() {
        let prompt = build_prompt("I like sushi", Register::Formal).unwrap();
        let roles: Vec<_> = prompt.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            [PromptRole::System, PromptRole::System, PromptRole::User]
        );
        assert_eq!(
            prompt[2].content,
            "How to say I like sushi in Japanese in formal speech?"
        );
    }

    #[test]
    fn role_message_embeds_register_example() {
        let formal = build_prompt("x", Register::Formal).unwrap();
        assert!(formal[0].content.contains("います"));
        assert!(formal[0].content.contains(r#""reading":"にほん""#));

        let casual = build_prompt("x", Register::Casual).unwrap();
        assert!(casual[0].content.contains("Verb + て form + いる"));
        assert!(!casual[0].content.contains("います"));
    }

    #[test]
    fn schema_message_names_grammar_breakdown() {
        let prompt = build_prompt("x", Register::Casual).unwrap();
        assert!(prompt[1].content.contains("\"grammarBreakdown\""));
        assert!(prompt[1].content.starts_with("You always respond with a JSON object"));
    }
}
