//! Message identifier - position of a message in the conversation history

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sequence position of a message; assigned as the history length at append time
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(usize);

impl MessageId {
    pub const fn new(position: usize) -> Self {
        Self(position)
    }

    /// Index into the conversation history
    pub const fn position(&self) -> usize {
        self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for MessageId {
    fn from(position: usize) -> Self {
        Self(position)
    }
}
