//! Settings for talking to a running server

use serde::{Deserialize, Serialize};

/// HTTP client configuration used by the terminal front end
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the Sensei server
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Request timeout in milliseconds; outlasts the server's own
    /// translation timeout so its error reaches the learner
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Where synthesized audio is written
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

fn default_server_url() -> String {
    "http://localhost:3000".to_string()
}

const fn default_timeout_ms() -> u64 {
    240_000
}

fn default_output_dir() -> String {
    "sensei-audio".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            timeout_ms: default_timeout_ms(),
            output_dir: default_output_dir(),
        }
    }
}
