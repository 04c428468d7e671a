//! Interactive lesson session
//!
//! Plain lines are questions; lines starting with `/` are commands.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::{io::Write, sync::Arc, time::Duration};

use application::{ConversationStateStore, DisplayToggle, error::ApplicationError};
use domain::{Classroom, MessageId, Register, TeacherVoice, thinking_indicator};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::warn;

use crate::render::{self, DisplayOptions};

pub const HELP: &str = "\
Type an English sentence to hear it in Japanese.
  /play <n>          replay message n
  /stop              stop the current message
  /voice <name>      Nanami or Naoki
  /speech <register> formal or casual
  /room <classroom>  default or alternative
  /furigana on|off   readings above kanji
  /english on|off    English glosses
  /history           list messages
  /help              this text
  /quit              leave";

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Ask(String),
    Play(MessageId),
    Stop,
    Voice(TeacherVoice),
    Register(Register),
    Classroom(Classroom),
    Toggle(DisplayToggle, bool),
    History,
    Help,
    Quit,
    Empty,
}

fn switch(value: Option<&str>) -> Result<bool, String> {
    match value {
        Some("on" | "yes" | "true") => Ok(true),
        Some("off" | "no" | "false") => Ok(false),
        _ => Err("expected on or off".to_string()),
    }
}

/// Parse a line of input
pub fn parse_line(line: &str) -> Result<ReplCommand, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(ReplCommand::Empty);
    }
    let Some(command) = line.strip_prefix('/') else {
        return Ok(ReplCommand::Ask(line.to_string()));
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default().to_lowercase();
    let arg = parts.next();

    match name.as_str() {
        "play" => arg
            .and_then(|n| n.parse::<usize>().ok())
            .map(|n| ReplCommand::Play(MessageId::new(n)))
            .ok_or_else(|| "usage: /play <message number>".to_string()),
        "stop" => Ok(ReplCommand::Stop),
        "voice" | "teacher" => arg
            .ok_or_else(|| "usage: /voice Nanami|Naoki".to_string())?
            .parse()
            .map(ReplCommand::Voice)
            .map_err(|e| e.to_string()),
        "speech" | "register" => arg
            .ok_or_else(|| "usage: /speech formal|casual".to_string())?
            .parse()
            .map(ReplCommand::Register)
            .map_err(|e| e.to_string()),
        "room" | "classroom" => arg
            .ok_or_else(|| "usage: /room default|alternative".to_string())?
            .parse()
            .map(ReplCommand::Classroom)
            .map_err(|e| e.to_string()),
        "furigana" => switch(arg).map(|v| ReplCommand::Toggle(DisplayToggle::Furigana, v)),
        "english" => switch(arg).map(|v| ReplCommand::Toggle(DisplayToggle::English, v)),
        "history" => Ok(ReplCommand::History),
        "help" | "?" => Ok(ReplCommand::Help),
        "quit" | "exit" | "q" => Ok(ReplCommand::Quit),
        other => Err(format!("unknown command /{other}, try /help")),
    }
}

/// Line shown for a failed command
pub fn failure_line(err: &ApplicationError) -> String {
    if err.is_retryable() {
        format!("❌ {err} (try again in a moment)")
    } else {
        format!("❌ {err}")
    }
}

/// Whether the session keeps going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A learner's session over a conversation store
#[derive(Debug)]
pub struct ReplSession {
    store: Arc<ConversationStateStore>,
}

impl ReplSession {
    pub const fn new(store: Arc<ConversationStateStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &ConversationStateStore {
        &self.store
    }

    fn display(&self) -> DisplayOptions {
        let snapshot = self.store.snapshot();
        DisplayOptions {
            furigana: snapshot.show_furigana,
            english: snapshot.show_english,
        }
    }

    /// Ask while a thinking indicator ticks on stderr
    async fn ask(&self, text: &str) -> Result<Option<MessageId>, ApplicationError> {
        let ask = self.store.ask(text);
        tokio::pin!(ask);

        let mut ticker = tokio::time::interval(Duration::from_millis(400));
        let mut tick = 0;
        let result = loop {
            tokio::select! {
                result = &mut ask => break result,
                _ = ticker.tick() => {
                    if self.store.snapshot().loading {
                        eprint!("\r{:<3}", thinking_indicator(tick));
                        let _ = std::io::stderr().flush();
                        tick += 1;
                    }
                }
            }
        };
        if tick > 0 {
            eprint!("\r   \r");
        }
        result
    }

    /// Run one command
    pub async fn execute(&self, command: ReplCommand) -> Result<Flow, ApplicationError> {
        match command {
            ReplCommand::Ask(text) => {
                if let Some(id) = self.ask(&text).await? {
                    let snapshot = self.store.snapshot();
                    if let Some(message) = snapshot.message(id) {
                        println!("#{id}");
                        print!("{}", render::lesson(&message.answer, self.display()));
                    }
                    self.store.on_playback_finished(id);
                }
            },
            ReplCommand::Play(id) => {
                self.store.play(id).await?;
                self.store.on_playback_finished(id);
            },
            ReplCommand::Stop => {
                if let Some(id) = self.store.snapshot().current_message {
                    self.store.stop(id);
                }
            },
            ReplCommand::Voice(voice) => {
                self.store.set_voice(voice);
                println!("👩‍🏫 Teacher: {voice}");
            },
            ReplCommand::Register(register) => {
                self.store.set_register(register);
                println!("🎚  Register: {register}");
            },
            ReplCommand::Classroom(classroom) => {
                self.store.set_classroom(classroom);
                println!("🏫 Classroom: {classroom}");
            },
            ReplCommand::Toggle(toggle, value) => {
                self.store.set_display_toggle(toggle, value);
            },
            ReplCommand::History => {
                let snapshot = self.store.snapshot();
                let options = self.display();
                for message in &snapshot.messages {
                    let current = snapshot.current_message == Some(message.id);
                    println!("{}", render::message(message, options, current));
                }
            },
            ReplCommand::Help => println!("{HELP}"),
            ReplCommand::Quit => return Ok(Flow::Quit),
            ReplCommand::Empty => {},
        }
        Ok(Flow::Continue)
    }

    /// Read lines until end of input or `/quit`
    pub async fn run<R>(&self, reader: R) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = reader.lines();
        loop {
            print!("先生> ");
            let _ = std::io::stdout().flush();

            let Some(line) = lines.next_line().await? else {
                println!();
                return Ok(());
            };

            let command = match parse_line(&line) {
                Ok(command) => command,
                Err(e) => {
                    println!("⚠️  {e}");
                    continue;
                },
            };

            match self.execute(command).await {
                Ok(Flow::Quit) => return Ok(()),
                Ok(Flow::Continue) => {},
                Err(e) => {
                    warn!(error = %e, "Command failed");
                    println!("{}", failure_line(&e));
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_a_question() {
        assert_eq!(
            parse_line("  I like sushi ").unwrap(),
            ReplCommand::Ask("I like sushi".to_string())
        );
    }

    #[test]
    fn blank_is_empty() {
        assert_eq!(parse_line("   ").unwrap(), ReplCommand::Empty);
    }

    #[test]
    fn commands_with_arguments() {
        assert_eq!(
            parse_line("/play 2").unwrap(),
            ReplCommand::Play(MessageId::new(2))
        );
        assert_eq!(
            parse_line("/voice naoki").unwrap(),
            ReplCommand::Voice(TeacherVoice::Naoki)
        );
        assert_eq!(
            parse_line("/speech Casual").unwrap(),
            ReplCommand::Register(Register::Casual)
        );
        assert_eq!(
            parse_line("/room alternative").unwrap(),
            ReplCommand::Classroom(Classroom::Alternative)
        );
        assert_eq!(
            parse_line("/furigana off").unwrap(),
            ReplCommand::Toggle(DisplayToggle::Furigana, false)
        );
    }

    #[test]
    fn bad_arguments_are_reported() {
        assert!(parse_line("/play two").is_err());
        assert!(parse_line("/voice Hiro").is_err());
        assert!(parse_line("/english maybe").is_err());
        assert!(parse_line("/dance").is_err());
    }

    #[test]
    fn retryable_failures_suggest_retry() {
        let busy = failure_line(&ApplicationError::Busy("ask".to_string()));
        assert_eq!(busy, "❌ Busy: ask in progress (try again in a moment)");

        let parse = failure_line(&ApplicationError::Parse("bad json".to_string()));
        assert!(!parse.contains("try again"));
    }

    #[test]
    fn quit_aliases() {
        for line in ["/quit", "/exit", "/q"] {
            assert_eq!(parse_line(line).unwrap(), ReplCommand::Quit);
        }
    }
}
