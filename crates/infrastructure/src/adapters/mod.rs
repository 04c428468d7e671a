//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations: the
//! gateways running in-process, or a Sensei server reached over HTTP.

mod http_lesson_client;
mod speech_adapter;
mod translation_adapter;

pub use http_lesson_client::HttpLessonClient;
pub use speech_adapter::SpeechGatewayAdapter;
pub use translation_adapter::TranslationGatewayAdapter;
