// Document summarization: uploaded document → markdown summary.

pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod store;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// How much detail the summary should keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailLevel {
    Low,
    Medium,
    High,
}

impl DetailLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetailLevel::Low => "low",
            DetailLevel::Medium => "medium",
            DetailLevel::High => "high",
        }
    }

    /// Instruction appended to the system prompt for this level.
    pub fn guidance(&self) -> &'static str {
        match self {
            DetailLevel::Low => "Keep only the central thesis and the few points that support it.",
            DetailLevel::Medium => {
                "Cover every main point with a sentence or two of supporting detail."
            }
            DetailLevel::High => {
                "Cover every main point and the important examples, definitions and figures."
            }
        }
    }
}

impl fmt::Display for DetailLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DetailLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(DetailLevel::Low),
            "medium" => Ok(DetailLevel::Medium),
            "high" => Ok(DetailLevel::High),
            _ => Err(AppError::Validation(
                "detail_level must be one of: low, medium, high".to_string(),
            )),
        }
    }
}
