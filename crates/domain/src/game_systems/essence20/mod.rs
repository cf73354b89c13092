//! Essence20 rules for the pr-essence20 system.
//!
//! Everything here is pure and synchronous. Dice are evaluated by the caller,
//! either through [`SkillCheckPlan::roll_with`] or by resolving totals the
//! engine obtained from its die-roll port.

mod catalog;
mod creation;
mod derived;
mod dice_pool;
mod skill_check;

pub use catalog::{ResourceConversion, SkillCatalog, SkillDefinition, DEFAULT_MAX_RANK};
pub use creation::{
    validate_draft, CharacterDraft, CreationRules, CreationWarning, SkillDraft,
    DEFAULT_CHARACTER_NAME, DEFAULT_CREATION_ESSENCE_POINTS,
};
pub use derived::{derive_stats, DerivedStats, DerivedStatsInput};
pub use dice_pool::{build_dice_pool, clamp_rank, rank_to_die, staircase_dice, RANK_DICE};
pub use skill_check::{
    PoolRoll, SkillCheckOutcome, SkillCheckPlan, SkillCheckRequest, MAX_FLAT_BONUS,
};

/// The rules bundle handed to every use case: skill catalog plus creation rules.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Essence20System {
    catalog: SkillCatalog,
    creation_rules: CreationRules,
}

impl Essence20System {
    pub fn new(catalog: SkillCatalog, creation_rules: CreationRules) -> Self {
        Self {
            catalog,
            creation_rules,
        }
    }

    /// Standard catalog with the given creation rules.
    pub fn with_creation_rules(creation_rules: CreationRules) -> Self {
        Self::new(SkillCatalog::standard(), creation_rules)
    }

    pub fn system_id(&self) -> &'static str {
        "pr-essence20"
    }

    pub fn display_name(&self) -> &'static str {
        "Power Rangers Essence20"
    }

    pub fn catalog(&self) -> &SkillCatalog {
        &self.catalog
    }

    pub fn creation_rules(&self) -> &CreationRules {
        &self.creation_rules
    }

    /// Shorthand for [`validate_draft`] with this system's catalog and rules.
    pub fn validate(&self, draft: &CharacterDraft) -> Vec<CreationWarning> {
        validate_draft(&self.catalog, &self.creation_rules, draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_system_uses_standard_rules() {
        let system = Essence20System::default();
        assert_eq!(system.system_id(), "pr-essence20");
        assert_eq!(system.catalog().len(), 21);
        assert_eq!(system.creation_rules().essence_points, 12);
    }

    #[test]
    fn validate_uses_configured_points() {
        let system = Essence20System::with_creation_rules(CreationRules { essence_points: 4 });
        assert!(system.validate(&CharacterDraft::default()).is_empty());
    }
}
