//! Speech register - formality level of the generated Japanese

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Formality level used when generating Japanese
///
/// Alters verb conjugation in the worked example and in the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Register {
    /// Polite speech (です/ます forms)
    #[default]
    Formal,
    /// Plain speech between friends
    Casual,
}

impl Register {
    /// Wire representation used in query strings and prompts
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Formal => "formal",
            Self::Casual => "casual",
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Register {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "formal" => Ok(Self::Formal),
            "casual" => Ok(Self::Casual),
            _ => Err(DomainError::InvalidRegister(s.to_string())),
        }
    }
}
