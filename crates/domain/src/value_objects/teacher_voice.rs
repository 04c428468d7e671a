//! Teacher voice - which avatar and voice is speaking

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Available teachers; each one has its own avatar and synthesized voice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TeacherVoice {
    /// Female teacher
    #[default]
    Nanami,
    /// Male teacher
    Naoki,
}

impl TeacherVoice {
    /// All teachers in selection order
    pub const ALL: [Self; 2] = [Self::Nanami, Self::Naoki];

    /// Name used as the voice identifier on the wire
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Nanami => "Nanami",
            Self::Naoki => "Naoki",
        }
    }
}

impl fmt::Display for TeacherVoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TeacherVoice {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::InvalidTeacher(s.to_string()))
    }
}
