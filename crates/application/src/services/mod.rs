//! Application services

mod conversation_state;

pub use conversation_state::{
    ConversationSnapshot, ConversationStateStore, DisplayToggle, InFlight, ProviderPreferences,
};
