//! Sensei terminal front end
//!
//! Talks to a running Sensei server: one-shot lessons, speech downloads and
//! an interactive session that drives the conversation state store.

pub mod cli;
pub mod playback;
pub mod render;
pub mod repl;

pub use cli::{Cli, Commands};
pub use playback::TerminalPlayback;
pub use repl::{ReplCommand, parse_line};
