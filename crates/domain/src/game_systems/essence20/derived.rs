//! Derived statistics: defenses and max health.

use serde::{Deserialize, Serialize};

use super::catalog::DEFAULT_MAX_RANK;
use crate::value_objects::{
    ArmorState, DefenseScore, DefenseSet, EssenceKey, EssenceScoreSet, DEFENSE_BASE,
};

/// Everything the calculator reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedStatsInput {
    pub essences: EssenceScoreSet,
    pub armor: ArmorState,
    pub morphed: bool,
    /// Combined rank of health-converting skills (conditioning)
    pub conditioning_rank: i32,
    pub health_base: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedStats {
    pub defenses: DefenseSet,
    pub max_health: i32,
}

/// Compute defenses and max health.
///
/// Every defense is `10 + essence`. Toughness also adds the armor bonus and,
/// while morphed, the training tier's morph bonus. Max health is
/// `base + conditioning`, with conditioning clamped to `[0, 6]`. All inputs
/// are clamped and sums saturate at `i32::MAX`, so there is no failure case.
pub fn derive_stats(input: &DerivedStatsInput) -> DerivedStats {
    let defense = |key: EssenceKey| DEFENSE_BASE.saturating_add(input.essences.get(key).max(0));

    let armor_bonus = input.armor.bonus_toughness.max(0);
    let morph_bonus = if input.morphed {
        input.armor.training.morphed_toughness_bonus()
    } else {
        0
    };
    let toughness_base = defense(EssenceKey::Strength);

    let defenses = DefenseSet {
        toughness: DefenseScore {
            base: toughness_base,
            total: toughness_base
                .saturating_add(armor_bonus)
                .saturating_add(morph_bonus),
        },
        evasion: DefenseScore::flat(defense(EssenceKey::Speed)),
        willpower: DefenseScore::flat(defense(EssenceKey::Smarts)),
        cleverness: DefenseScore::flat(defense(EssenceKey::Social)),
    };

    let conditioning = input
        .conditioning_rank
        .clamp(0, i32::from(DEFAULT_MAX_RANK));
    let max_health = input.health_base.max(0).saturating_add(conditioning);

    DerivedStats {
        defenses,
        max_health,
    }
}
