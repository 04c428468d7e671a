//! Classroom layout the scene is rendered in

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Display context for the 3D scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classroom {
    /// Board straight ahead
    #[default]
    Default,
    /// Rotated layout with the board on the side
    Alternative,
}

impl Classroom {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Alternative => "alternative",
        }
    }
}

impl fmt::Display for Classroom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Classroom {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "alternative" => Ok(Self::Alternative),
            _ => Err(DomainError::InvalidClassroom(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_layouts() {
        assert_eq!("alternative".parse::<Classroom>().unwrap(), Classroom::Alternative);
        assert_eq!("default".parse::<Classroom>().unwrap(), Classroom::Default);
    }

    #[test]
    fn rejects_unknown_layout() {
        assert!(matches!(
            "gym".parse::<Classroom>(),
            Err(DomainError::InvalidClassroom(_))
        ));
    }
}
