//! Read model for rendering a character sheet.
//!
//! The host renders whatever it likes; this module only flattens a
//! [`Character`] plus the catalog into the rows and groups a sheet shows.

use serde::{Deserialize, Serialize};

use crate::aggregates::Character;
use crate::entities::{CharacterItem, ItemKind};
use crate::game_systems::SkillCatalog;
use crate::ids::CharacterId;
use crate::value_objects::{
    ArmorState, ArmorTraining, CharacterDetails, CharacterKind, DefenseSet, EssenceKey,
    ResourcePools,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EssenceRow {
    pub key: EssenceKey,
    pub label: String,
    pub value: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillRow {
    pub id: String,
    pub label: String,
    pub essence: EssenceKey,
    pub no_roll: bool,
    pub no_spec: bool,
    pub rank: u8,
    pub specialized: bool,
    pub specialization: String,
    pub notes: String,
}

/// Skills governed by one essence, sorted by label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillGroup {
    pub essence: EssenceKey,
    pub label: String,
    pub skills: Vec<SkillRow>,
}

/// One choice in the armor training selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArmorTrainingOption {
    pub id: ArmorTraining,
    pub label: String,
    /// Toughness bonus while morphed
    pub bonus: i32,
    pub selected: bool,
}

impl ArmorTrainingOption {
    /// Every training tier, marking `current` as selected.
    pub fn all(current: ArmorTraining) -> Vec<Self> {
        ArmorTraining::ALL
            .into_iter()
            .map(|t| Self {
                id: t,
                label: t.label().to_string(),
                bonus: t.morphed_toughness_bonus(),
                selected: t == current,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemGroup {
    pub kind: ItemKind,
    pub items: Vec<CharacterItem>,
}

/// Everything a sheet displays.
///
/// Built from the cached derived data, so call
/// [`Character::prepare_derived_data`] first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetView {
    pub id: CharacterId,
    pub name: String,
    pub kind: CharacterKind,
    pub details: CharacterDetails,
    pub morphed: bool,
    pub essences: Vec<EssenceRow>,
    pub skill_groups: Vec<SkillGroup>,
    pub armor: ArmorState,
    pub armor_training: Vec<ArmorTrainingOption>,
    pub defenses: DefenseSet,
    pub resources: ResourcePools,
    /// One group per item kind, in kind order, empty groups included
    pub items: Vec<ItemGroup>,
}

impl SheetView {
    pub fn build(character: &Character, catalog: &SkillCatalog) -> Self {
        let essences = character
            .essences()
            .iter()
            .map(|(key, value)| EssenceRow {
                key,
                label: key.label().to_string(),
                value,
            })
            .collect();

        let skill_groups = EssenceKey::ALL
            .into_iter()
            .map(|essence| SkillGroup {
                essence,
                label: essence.label().to_string(),
                skills: catalog
                    .by_essence(essence)
                    .into_iter()
                    .map(|def| {
                        let entry = character.skill(def.id);
                        SkillRow {
                            id: def.id.to_string(),
                            label: def.label.to_string(),
                            essence: def.essence,
                            no_roll: def.no_roll,
                            no_spec: def.no_spec,
                            rank: entry.map_or(0, |s| s.rank),
                            specialized: entry.is_some_and(|s| s.specialized),
                            specialization: entry
                                .map(|s| s.specialization.clone())
                                .unwrap_or_default(),
                            notes: entry.map(|s| s.notes.clone()).unwrap_or_default(),
                        }
                    })
                    .collect(),
            })
            .collect();

        let items = ItemKind::ALL
            .into_iter()
            .map(|kind| ItemGroup {
                kind,
                items: character.items_of_kind(kind).cloned().collect(),
            })
            .collect();

        Self {
            id: character.id(),
            name: character.name().to_string(),
            kind: character.kind(),
            details: character.details().clone(),
            morphed: character.is_morphed(),
            essences,
            skill_groups,
            armor: *character.armor(),
            armor_training: ArmorTrainingOption::all(character.armor().training),
            defenses: *character.defenses(),
            resources: *character.resources(),
            items,
        }
    }

    pub fn skill_group(&self, essence: EssenceKey) -> Option<&SkillGroup> {
        self.skill_groups.iter().find(|g| g.essence == essence)
    }
}
