use crate::domain::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Narrative context a sample belongs to. Declaration order is the canonical
/// lane order used for listing, stats and auxiliary-lane allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Lane {
    Dialogue,
    Narration,
    Interiority,
    Action,
}

impl Lane {
    pub const ALL: [Lane; 4] = [
        Lane::Dialogue,
        Lane::Narration,
        Lane::Interiority,
        Lane::Action,
    ];

    pub fn index(self) -> usize {
        match self {
            Lane::Dialogue => 0,
            Lane::Narration => 1,
            Lane::Interiority => 2,
            Lane::Action => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Lane::Dialogue => "Dialogue",
            Lane::Narration => "Narration",
            Lane::Interiority => "Interiority",
            Lane::Action => "Action",
        }
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Lane {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dialogue" => Ok(Lane::Dialogue),
            "narration" => Ok(Lane::Narration),
            "interiority" => Ok(Lane::Interiority),
            "action" => Ok(Lane::Action),
            _ => Err(ValidationError::UnknownLane(s.to_string())),
        }
    }
}
