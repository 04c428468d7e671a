//! AI Speech - Text-to-Speech gateway
//!
//! Vocalizes Japanese text for the avatar and produces the lip-sync viseme
//! timeline that goes with it.
//!
//! # Architecture
//!
//! This crate follows the ports & adapters pattern:
//! - `ports` defines the [`TextToSpeech`] trait
//! - `providers` contains the Azure and LOVO adapters
//! - `fallback` evaluates an ordered [`FallbackChain`] and degrades to a
//!   client-side directive whenever a backend is unavailable or fails
//!
//! ```text
//! text + voice + hint
//!     │
//!     ▼
//! ┌──────────────────────────────┐
//! │        SpeechGateway         │
//! │  azure? ─▶ lovo? ─▶ directive│
//! └──────────────────────────────┘
//!     │
//!     ▼
//! SpeechOutput (audio + visemes | client directive)
//! ```

pub mod config;
pub mod error;
pub mod fallback;
pub mod ports;
pub mod providers;
pub mod visemes;

pub use config::{AzureConfig, LovoConfig, SpeechConfig, SpeechProvider};
pub use error::SpeechError;
pub use fallback::{FallbackChain, RouteDecision, SpeechGateway, SpeechRoute};
pub use ports::TextToSpeech;
pub use providers::{azure::AzureSpeechProvider, lovo::LovoSpeechProvider};
