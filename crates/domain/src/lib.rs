//! Domain layer for Sensei
//!
//! Contains the language-lesson data model: questions, translations with
//! grammar breakdowns, conversation messages, speech output and viseme
//! timelines. This layer performs no I/O and defines the ubiquitous language.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
