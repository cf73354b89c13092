//! Armor training tiers and worn armor state.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Armor training tier. Determines the toughness bonus while morphed.
///
/// Deserializing never fails on an unknown or missing key; it reads as light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "Option<String>")]
pub enum ArmorTraining {
    #[default]
    Light,
    Medium,
    Heavy,
    UltraHeavy,
}

impl ArmorTraining {
    pub const ALL: [ArmorTraining; 4] = [
        ArmorTraining::Light,
        ArmorTraining::Medium,
        ArmorTraining::Heavy,
        ArmorTraining::UltraHeavy,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ArmorTraining::Light => "light",
            ArmorTraining::Medium => "medium",
            ArmorTraining::Heavy => "heavy",
            ArmorTraining::UltraHeavy => "ultraHeavy",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ArmorTraining::Light => "Light",
            ArmorTraining::Medium => "Medium",
            ArmorTraining::Heavy => "Heavy",
            ArmorTraining::UltraHeavy => "Ultra-Heavy",
        }
    }

    /// Toughness added while the morphed toggle is on.
    pub fn morphed_toughness_bonus(&self) -> i32 {
        match self {
            ArmorTraining::Light => 1,
            ArmorTraining::Medium => 2,
            ArmorTraining::Heavy => 4,
            ArmorTraining::UltraHeavy => 6,
        }
    }

    /// Parse a stored key, falling back to light training for anything unknown.
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl From<Option<String>> for ArmorTraining {
    fn from(stored: Option<String>) -> Self {
        stored
            .as_deref()
            .map(ArmorTraining::parse_or_default)
            .unwrap_or_default()
    }
}

impl fmt::Display for ArmorTraining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ArmorTraining {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(ArmorTraining::Light),
            "medium" => Ok(ArmorTraining::Medium),
            "heavy" => Ok(ArmorTraining::Heavy),
            "ultraHeavy" | "ultra_heavy" | "ultra-heavy" => Ok(ArmorTraining::UltraHeavy),
            other => Err(DomainError::parse(format!("Unknown armor training: {}", other))),
        }
    }
}

/// Armor currently worn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredArmorState")]
pub struct ArmorState {
    pub training: ArmorTraining,
    /// Flat toughness bonus from gear (>= 0)
    pub bonus_toughness: i32,
}

impl ArmorState {
    pub fn new(training: ArmorTraining, bonus_toughness: i32) -> Self {
        Self {
            training,
            bonus_toughness: bonus_toughness.max(0),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredArmorState {
    #[serde(default)]
    training: ArmorTraining,
    #[serde(default)]
    bonus_toughness: i32,
}

impl From<StoredArmorState> for ArmorState {
    fn from(stored: StoredArmorState) -> Self {
        Self::new(stored.training, stored.bonus_toughness)
    }
}
