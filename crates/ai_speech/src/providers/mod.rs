//! Text-to-speech backend implementations

pub mod azure;
pub mod lovo;
