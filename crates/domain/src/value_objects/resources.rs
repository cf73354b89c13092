//! Health, personal power and movement pools.

use serde::{Deserialize, Serialize};

/// Default movement speed for a new character.
pub const DEFAULT_MOVEMENT: i32 = 30;

/// Health pool.
///
/// `max` is derived (`base` + conditioning rank) and refreshed on every
/// recompute; `value` never stays above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthPool {
    pub base: i32,
    pub value: i32,
    pub max: i32,
}

impl HealthPool {
    /// Store a freshly derived max and pull `value` down to it if needed.
    ///
    /// Returns `true` when `value` was lowered.
    pub fn apply_max(&mut self, max: i32) -> bool {
        self.max = max;
        if self.value > max {
            self.value = max;
            true
        } else {
            false
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalPower {
    pub max: i32,
    pub value: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movement {
    pub value: i32,
}

impl Default for Movement {
    fn default() -> Self {
        Self {
            value: DEFAULT_MOVEMENT,
        }
    }
}

/// All tracked resources of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourcePools {
    pub health: HealthPool,
    pub personal_power: PersonalPower,
    pub movement: Movement,
}
