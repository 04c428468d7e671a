//! Command-line arguments

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use domain::{Register, TeacherVoice};

/// Sensei CLI
#[derive(Debug, Parser)]
#[command(name = "sensei-cli")]
#[command(author, version, about = "Sensei AI Japanese teacher CLI", long_about = None)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Server URL (defaults to client.server_url from configuration)
    #[arg(short, long, global = true, env = "SENSEI_SERVER_URL")]
    pub url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Translate one question into a lesson
    Ask {
        /// English question
        question: String,

        /// Speech register: formal or casual
        #[arg(short, long, default_value = "formal")]
        speech: Register,

        /// Translation provider: openai or openrouter
        #[arg(short, long)]
        provider: Option<String>,

        /// Hide readings above kanji
        #[arg(long)]
        no_furigana: bool,
    },

    /// Synthesize Japanese text
    Tts {
        /// Japanese text
        text: String,

        /// Teacher voice: Nanami or Naoki
        #[arg(short, long, default_value = "Nanami")]
        teacher: TeacherVoice,

        /// Speech provider: azure, lovo or browser
        #[arg(short, long)]
        provider: Option<String>,

        /// Directory for audio files
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Interactive lesson session
    Repl {
        /// Starting teacher
        #[arg(short, long, default_value = "Nanami")]
        teacher: TeacherVoice,

        /// Starting register
        #[arg(short, long, default_value = "formal")]
        speech: Register,

        /// Translation provider hint
        #[arg(long)]
        ai_provider: Option<String>,

        /// Speech provider hint
        #[arg(long)]
        speech_provider: Option<String>,

        /// Directory for audio files
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check server health
    Health,
}

/// Determine log filter level from verbosity count
pub const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(log_filter_from_verbosity(0), "warn");
        assert_eq!(log_filter_from_verbosity(2), "debug");
        assert_eq!(log_filter_from_verbosity(9), "trace");
    }

    #[test]
    fn command_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
