//! Descriptive character details.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Whether a sheet belongs to a player character or an NPC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CharacterKind {
    #[default]
    Character,
    Npc,
}

impl fmt::Display for CharacterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharacterKind::Character => write!(f, "character"),
            CharacterKind::Npc => write!(f, "npc"),
        }
    }
}

impl FromStr for CharacterKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "character" => Ok(CharacterKind::Character),
            "npc" => Ok(CharacterKind::Npc),
            other => Err(DomainError::parse(format!("Unknown character kind: {}", other))),
        }
    }
}

/// Free-text details block. Only `level` carries a rule (>= 1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterDetails {
    pub level: i32,
    pub role: String,
    pub origin: String,
    pub pronouns: String,
    pub description: String,
    pub languages: String,
    pub influences: String,
    pub hangups: String,
    pub notes: String,
}

impl Default for CharacterDetails {
    fn default() -> Self {
        Self {
            level: 1,
            role: String::new(),
            origin: String::new(),
            pronouns: String::new(),
            description: String::new(),
            languages: String::new(),
            influences: String::new(),
            hangups: String::new(),
            notes: String::new(),
        }
    }
}
