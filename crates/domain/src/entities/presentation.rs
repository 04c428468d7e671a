//! Presentation cues derived from conversation state
//!
//! The renderer consumes these; nothing here draws anything.

use serde::{Deserialize, Serialize};

/// Body animation the avatar should be playing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvatarAnimation {
    Idle,
    Thinking,
    Talking,
}

impl AvatarAnimation {
    /// Loading wins over speaking; speaking wins over idling
    pub const fn derive(loading: bool, speaking: bool) -> Self {
        if loading {
            Self::Thinking
        } else if speaking {
            Self::Talking
        } else {
            Self::Idle
        }
    }
}

/// Ellipsis shown above the avatar while loading; cycles ".", "..", "..."
pub const fn thinking_indicator(tick: usize) -> &'static str {
    match tick % 3 {
        0 => ".",
        1 => "..",
        _ => "...",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_means_thinking() {
        assert_eq!(AvatarAnimation::derive(true, true), AvatarAnimation::Thinking);
        assert_eq!(AvatarAnimation::derive(true, false), AvatarAnimation::Thinking);
    }

    #[test]
    fn speaking_means_talking() {
        assert_eq!(AvatarAnimation::derive(false, true), AvatarAnimation::Talking);
    }

    #[test]
    fn otherwise_idle() {
        assert_eq!(AvatarAnimation::derive(false, false), AvatarAnimation::Idle);
    }

    #[test]
    fn indicator_cycles() {
        assert_eq!(thinking_indicator(0), ".");
        assert_eq!(thinking_indicator(1), "..");
        assert_eq!(thinking_indicator(2), "...");
        assert_eq!(thinking_indicator(3), ".");
    }
}
