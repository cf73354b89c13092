extern crate self as pr20_domain;

pub mod common;

pub mod aggregates;
pub mod character_sheet;
pub mod entities;
pub mod error;
pub mod forms;
pub mod game_systems;
pub mod ids;
pub mod value_objects;

pub use aggregates::Character;
pub use entities::{CharacterItem, ItemKind, SkillEntry};
pub use error::DomainError;

// Re-export the Essence20 rules
pub use game_systems::{
    build_dice_pool, derive_stats, rank_to_die, staircase_dice, validate_draft, CharacterDraft,
    CreationRules, CreationWarning, DerivedStats, DerivedStatsInput, Essence20System, PoolRoll,
    ResourceConversion, SkillCatalog, SkillCheckOutcome, SkillCheckPlan, SkillCheckRequest,
    SkillDefinition, SkillDraft, MAX_FLAT_BONUS, RANK_DICE,
};

// Re-export character sheet view types
pub use character_sheet::{
    ArmorTrainingOption, EssenceRow, ItemGroup, SheetView, SkillGroup, SkillRow,
};

// Re-export form boundary types
pub use forms::{
    parse_builder_form, parse_sheet_update, DetailField, FormData, FormValue, SheetUpdate,
    SkillPatch,
};

// Re-export ID types
pub use ids::{CharacterId, ItemId};

// Re-export value objects
pub use value_objects::{
    ArmorState, ArmorTraining, CharacterDetails, CharacterKind, CharacterName, D20Shape,
    DefenseKind, DefenseScore, DefenseSet, DiceFormula, DiceParseError, EssenceKey,
    EssenceScoreSet, HealthPool, KeepRule, Movement, PersonalPower, ResourcePools,
};
