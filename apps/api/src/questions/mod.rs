// Quiz generation: uploaded document → multiple-choice questions → test.

pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod store;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    #[serde(rename = "beginner")]
    Beginner,
    #[serde(rename = "easy")]
    Easy,
    #[serde(rename = "medium")]
    Medium,
    #[serde(rename = "hard")]
    Hard,
    #[serde(rename = "very hard")]
    VeryHard,
    #[serde(rename = "expert")]
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 6] = [
        Difficulty::Beginner,
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::VeryHard,
        Difficulty::Expert,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::VeryHard => "very hard",
            Difficulty::Expert => "expert",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', " ");
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str() == normalized)
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "difficulty must be one of: {}",
                    Difficulty::ALL.map(|d| d.as_str()).join(", ")
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_parses_every_level() {
        for level in Difficulty::ALL {
            assert_eq!(level.as_str().parse::<Difficulty>().unwrap(), level);
        }
        assert_eq!("Very_Hard".parse::<Difficulty>().unwrap(), Difficulty::VeryHard);
    }

    #[test]
    fn test_unknown_difficulty_is_validation_error() {
        assert!(matches!(
            "impossible".parse::<Difficulty>(),
            Err(AppError::Validation(_))
        ));
    }
}
