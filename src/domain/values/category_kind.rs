use crate::domain::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Namespace a category lives in. A voice and a style bank may share a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    /// Voice profiles (author voice samples)
    Voice,
    /// Style banks (stylistic exemplars)
    StyleBank,
}

impl CategoryKind {
    pub const ALL: [CategoryKind; 2] = [CategoryKind::Voice, CategoryKind::StyleBank];
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Voice => write!(f, "voice"),
            Self::StyleBank => write!(f, "style_bank"),
        }
    }
}

impl FromStr for CategoryKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "voice" | "voices" => Ok(Self::Voice),
            "style" | "style-bank" | "style_bank" | "stylebank" | "bank" => Ok(Self::StyleBank),
            _ => Err(ValidationError::UnknownKind(s.to_string())),
        }
    }
}
