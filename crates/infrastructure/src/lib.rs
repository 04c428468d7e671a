//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer, either in-process on
//! top of the translation and speech gateways or over HTTP against a running
//! Sensei server. Also owns configuration loading and log setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, ClientConfig, ServerConfig};
pub use telemetry::{LogFormat, init_logging};
