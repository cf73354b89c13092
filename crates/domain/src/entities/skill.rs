//! Skill entry - a character's training in one catalog skill

use serde::{Deserialize, Serialize};

use crate::game_systems::SkillDefinition;
use crate::value_objects::EssenceKey;

/// A character's standing in a single skill.
///
/// # Invariants
///
/// - `rank` stays within `[0, max_rank]` of the skill's catalog definition
/// - `specialized` is only stored as `true` when `rank > 0` and the catalog
///   allows specialization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillEntry {
    pub label: String,
    pub essence: EssenceKey,
    pub rank: u8,
    pub specialized: bool,
    /// Free-text name of the specialization (e.g. "Motorcycles")
    pub specialization: String,
    pub notes: String,
}

impl SkillEntry {
    /// An untrained entry for a catalog skill.
    pub fn untrained(definition: &SkillDefinition) -> Self {
        Self {
            label: definition.label.to_string(),
            essence: definition.essence,
            rank: 0,
            specialized: false,
            specialization: String::new(),
            notes: String::new(),
        }
    }

    /// Whether the stored specialization actually applies under the catalog rules.
    pub fn is_effectively_specialized(&self, definition: &SkillDefinition) -> bool {
        self.specialized && !definition.no_spec && self.rank > 0
    }
}
