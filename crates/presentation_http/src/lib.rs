//! Sensei HTTP presentation layer
//!
//! Serves the lesson (`/api/ai`) and speech (`/api/tts`) endpoints consumed
//! by the browser front end and the terminal client.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
