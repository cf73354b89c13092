//! Game system rules.
//!
//! Only Essence20 is implemented. System-specific types stay inside their
//! module and are re-exported here for the rest of the crate.

mod essence20;

pub use essence20::{
    build_dice_pool, clamp_rank, derive_stats, rank_to_die, staircase_dice, validate_draft,
    CharacterDraft, CreationRules, CreationWarning, DerivedStats, DerivedStatsInput,
    Essence20System, PoolRoll, ResourceConversion, SkillCatalog, SkillCheckOutcome,
    SkillCheckPlan, SkillCheckRequest, SkillDefinition, SkillDraft, DEFAULT_CHARACTER_NAME,
    DEFAULT_CREATION_ESSENCE_POINTS, DEFAULT_MAX_RANK, MAX_FLAT_BONUS, RANK_DICE,
};
