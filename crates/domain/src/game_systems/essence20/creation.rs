//! Character creation drafts and their validation.
//!
//! Validation never blocks. It returns warnings and the caller decides
//! whether to commit the draft anyway.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::catalog::SkillCatalog;
use crate::value_objects::{
    ArmorState, CharacterDetails, CharacterKind, EssenceKey, EssenceScoreSet, ResourcePools,
};

/// Essence points a level 1 character is expected to spend.
pub const DEFAULT_CREATION_ESSENCE_POINTS: i32 = 12;

/// Name used when the builder form leaves the name blank.
pub const DEFAULT_CHARACTER_NAME: &str = "New Ranger";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreationRules {
    pub essence_points: i32,
}

impl Default for CreationRules {
    fn default() -> Self {
        Self {
            essence_points: DEFAULT_CREATION_ESSENCE_POINTS,
        }
    }
}

/// A non-blocking problem with a draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CreationWarning {
    EssenceTotal {
        total: i32,
        expected: i32,
    },
    EssenceBudget {
        essence: EssenceKey,
        spent: i32,
        cap: i32,
    },
    SpecializedUntrained {
        skill_id: String,
        label: String,
    },
    SpecializationForbidden {
        skill_id: String,
        label: String,
    },
}

impl fmt::Display for CreationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreationWarning::EssenceTotal { total, expected } => write!(
                f,
                "Essence total is {} (expected {} at level 1).",
                total, expected
            ),
            CreationWarning::EssenceBudget {
                essence,
                spent,
                cap,
            } => write!(
                f,
                "{}: skill ranks spent {} exceeds essence score {}.",
                essence, spent, cap
            ),
            CreationWarning::SpecializedUntrained { label, .. } => {
                write!(f, "{}: specialization checked but rank is 0.", label)
            }
            CreationWarning::SpecializationForbidden { label, .. } => {
                write!(f, "{}: cannot be specialized.", label)
            }
        }
    }
}

/// Builder input for one skill, before catalog rules are applied.
///
/// `specialized` is what the user asked for; it is only stored on the
/// character when the skill allows it and the rank is above 0.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillDraft {
    pub rank: u8,
    pub specialized: bool,
    pub specialization: String,
}

/// Everything the builder collects for a new (or rebuilt) character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterDraft {
    pub name: String,
    pub kind: CharacterKind,
    pub details: CharacterDetails,
    pub morphed: bool,
    pub armor: ArmorState,
    pub essences: EssenceScoreSet,
    /// Keyed by catalog skill id; missing skills are untrained
    pub skills: HashMap<String, SkillDraft>,
    pub resources: ResourcePools,
}

impl Default for CharacterDraft {
    fn default() -> Self {
        Self {
            name: DEFAULT_CHARACTER_NAME.to_string(),
            kind: CharacterKind::default(),
            details: CharacterDetails::default(),
            morphed: false,
            armor: ArmorState::default(),
            essences: EssenceScoreSet::default(),
            skills: HashMap::new(),
            resources: ResourcePools::default(),
        }
    }
}

impl CharacterDraft {
    /// Draft input for a skill, untrained when absent.
    pub fn skill(&self, id: &str) -> SkillDraft {
        self.skills.get(id).cloned().unwrap_or_default()
    }

    pub fn set_skill(&mut self, id: impl Into<String>, skill: SkillDraft) {
        self.skills.insert(id.into(), skill);
    }
}

/// Check a draft against the creation rules.
///
/// Warnings come in a stable order: the essence total, then the per-essence
/// budgets in essence order, then specialization problems in catalog order.
/// Ranks above a skill's max rank are counted at the max.
pub fn validate_draft(
    catalog: &SkillCatalog,
    rules: &CreationRules,
    draft: &CharacterDraft,
) -> Vec<CreationWarning> {
    let mut warnings = Vec::new();

    let total = draft.essences.total();
    if total != rules.essence_points {
        warnings.push(CreationWarning::EssenceTotal {
            total,
            expected: rules.essence_points,
        });
    }

    let rank_of = |id: &str, max_rank: u8| i32::from(draft.skill(id).rank.min(max_rank));

    for essence in EssenceKey::ALL {
        let spent: i32 = catalog
            .iter()
            .filter(|s| s.essence == essence && s.spends_essence_budget())
            .map(|s| rank_of(s.id, s.max_rank))
            .sum();
        let cap = draft.essences.get(essence);
        if spent > cap {
            warnings.push(CreationWarning::EssenceBudget {
                essence,
                spent,
                cap,
            });
        }
    }

    for skill in catalog.iter() {
        let input = draft.skill(skill.id);
        if !input.specialized {
            continue;
        }
        if rank_of(skill.id, skill.max_rank) == 0 {
            warnings.push(CreationWarning::SpecializedUntrained {
                skill_id: skill.id.to_string(),
                label: skill.label.to_string(),
            });
        }
        if skill.no_spec {
            warnings.push(CreationWarning::SpecializationForbidden {
                skill_id: skill.id.to_string(),
                label: skill.label.to_string(),
            });
        }
    }

    warnings
}
