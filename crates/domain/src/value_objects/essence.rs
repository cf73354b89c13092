//! The four essences and a character's scores in them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// One of the four core attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EssenceKey {
    Strength,
    Speed,
    Smarts,
    Social,
}

impl EssenceKey {
    /// All essences in sheet order.
    pub const ALL: [EssenceKey; 4] = [
        EssenceKey::Strength,
        EssenceKey::Speed,
        EssenceKey::Smarts,
        EssenceKey::Social,
    ];

    /// Machine-readable key, as used in form field names.
    pub fn key(&self) -> &'static str {
        match self {
            EssenceKey::Strength => "strength",
            EssenceKey::Speed => "speed",
            EssenceKey::Smarts => "smarts",
            EssenceKey::Social => "social",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EssenceKey::Strength => "Strength",
            EssenceKey::Speed => "Speed",
            EssenceKey::Smarts => "Smarts",
            EssenceKey::Social => "Social",
        }
    }
}

impl fmt::Display for EssenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for EssenceKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EssenceKey::ALL
            .into_iter()
            .find(|k| k.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::parse(format!("Unknown essence: {}", s)))
    }
}

/// Essence value given to a fresh character before allocation.
pub const DEFAULT_ESSENCE_VALUE: i32 = 1;

/// Scores in the four essences.
///
/// # Invariants
///
/// - Every score is >= 0 (negative inputs are clamped on the way in,
///   including when deserialized)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredEssenceScores")]
pub struct EssenceScoreSet {
    strength: i32,
    speed: i32,
    smarts: i32,
    social: i32,
}

/// Stored shape of [`EssenceScoreSet`]. Missing scores take the default.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredEssenceScores {
    #[serde(default = "default_essence_value")]
    strength: i32,
    #[serde(default = "default_essence_value")]
    speed: i32,
    #[serde(default = "default_essence_value")]
    smarts: i32,
    #[serde(default = "default_essence_value")]
    social: i32,
}

fn default_essence_value() -> i32 {
    DEFAULT_ESSENCE_VALUE
}

impl From<StoredEssenceScores> for EssenceScoreSet {
    fn from(stored: StoredEssenceScores) -> Self {
        Self::new(stored.strength, stored.speed, stored.smarts, stored.social)
    }
}

impl Default for EssenceScoreSet {
    fn default() -> Self {
        Self::uniform(DEFAULT_ESSENCE_VALUE)
    }
}

impl EssenceScoreSet {
    pub fn new(strength: i32, speed: i32, smarts: i32, social: i32) -> Self {
        Self {
            strength: strength.max(0),
            speed: speed.max(0),
            smarts: smarts.max(0),
            social: social.max(0),
        }
    }

    /// Every essence at the same score.
    pub fn uniform(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn get(&self, key: EssenceKey) -> i32 {
        match key {
            EssenceKey::Strength => self.strength,
            EssenceKey::Speed => self.speed,
            EssenceKey::Smarts => self.smarts,
            EssenceKey::Social => self.social,
        }
    }

    /// Set one score, clamping to >= 0.
    pub fn set(&mut self, key: EssenceKey, value: i32) {
        let value = value.max(0);
        match key {
            EssenceKey::Strength => self.strength = value,
            EssenceKey::Speed => self.speed = value,
            EssenceKey::Smarts => self.smarts = value,
            EssenceKey::Social => self.social = value,
        }
    }

    /// Sum of all four scores, saturating at `i32::MAX`.
    pub fn total(&self) -> i32 {
        self.strength
            .saturating_add(self.speed)
            .saturating_add(self.smarts)
            .saturating_add(self.social)
    }

    /// Scores paired with their key, in sheet order.
    pub fn iter(&self) -> impl Iterator<Item = (EssenceKey, i32)> + '_ {
        EssenceKey::ALL.into_iter().map(move |k| (k, self.get(k)))
    }
}
