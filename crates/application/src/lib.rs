//! Application layer - Use cases and orchestration
//!
//! Defines the ports the lesson flow depends on (translation, speech,
//! playback) and the conversation state store that sequences them.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
