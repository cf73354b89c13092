//! Derived defenses.

use serde::{Deserialize, Serialize};

use super::EssenceKey;

/// Base value every defense starts from before adding its essence.
pub const DEFENSE_BASE: i32 = 10;

/// The four defenses, each tied to one essence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DefenseKind {
    Toughness,
    Evasion,
    Willpower,
    Cleverness,
}

impl DefenseKind {
    pub const ALL: [DefenseKind; 4] = [
        DefenseKind::Toughness,
        DefenseKind::Evasion,
        DefenseKind::Willpower,
        DefenseKind::Cleverness,
    ];

    pub fn essence(&self) -> EssenceKey {
        match self {
            DefenseKind::Toughness => EssenceKey::Strength,
            DefenseKind::Evasion => EssenceKey::Speed,
            DefenseKind::Willpower => EssenceKey::Smarts,
            DefenseKind::Cleverness => EssenceKey::Social,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DefenseKind::Toughness => "Toughness",
            DefenseKind::Evasion => "Evasion",
            DefenseKind::Willpower => "Willpower",
            DefenseKind::Cleverness => "Cleverness",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefenseScore {
    pub base: i32,
    pub total: i32,
}

impl Default for DefenseScore {
    fn default() -> Self {
        Self::flat(DEFENSE_BASE)
    }
}

impl DefenseScore {
    /// A score with no bonuses on top of its base.
    pub fn flat(base: i32) -> Self {
        Self { base, total: base }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefenseSet {
    pub toughness: DefenseScore,
    pub evasion: DefenseScore,
    pub willpower: DefenseScore,
    pub cleverness: DefenseScore,
}

impl DefenseSet {
    pub fn get(&self, kind: DefenseKind) -> DefenseScore {
        match kind {
            DefenseKind::Toughness => self.toughness,
            DefenseKind::Evasion => self.evasion,
            DefenseKind::Willpower => self.willpower,
            DefenseKind::Cleverness => self.cleverness,
        }
    }
}
