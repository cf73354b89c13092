//! Character aggregate - a player character or NPC sheet
//!
//! # Rustic DDD Design
//!
//! - **Private fields**: state changes go through methods that keep the
//!   skill, health and specialization invariants
//! - **Newtypes**: `CharacterName` is valid by construction
//! - **Derived data**: defenses and max health are recomputed by
//!   [`Character::prepare_derived_data`] and only cached here
//!
//! Rules that need the skill catalog take it as a parameter; the aggregate
//! never reaches for a global registry.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::entities::{CharacterItem, ItemKind, SkillEntry};
use crate::error::DomainError;
use crate::forms::SheetUpdate;
use crate::game_systems::{
    clamp_rank, derive_stats, CharacterDraft, DerivedStats, DerivedStatsInput,
    ResourceConversion, SkillCatalog, SkillCheckPlan, SkillCheckRequest,
};
use crate::ids::{CharacterId, ItemId};
use crate::value_objects::{
    ArmorState, CharacterDetails, CharacterKind, CharacterName, DefenseSet, EssenceKey,
    EssenceScoreSet, ResourcePools,
};

/// A character sheet.
///
/// # Invariants
///
/// - After [`Character::ensure_base_data`], every catalog skill has an entry
/// - Skill ranks stay within each skill's max rank
/// - `resources.health.value <= resources.health.max` after every
///   [`Character::prepare_derived_data`]
///
/// # Example
///
/// ```
/// use pr20_domain::aggregates::Character;
/// use pr20_domain::value_objects::{CharacterKind, CharacterName};
/// use pr20_domain::SkillCatalog;
///
/// let catalog = SkillCatalog::standard();
/// let name = CharacterName::new("Jason").unwrap();
/// let mut jason = Character::new(name, CharacterKind::Character, &catalog);
///
/// let derived = jason.prepare_derived_data(&catalog);
/// assert_eq!(derived.defenses.toughness.total, 11);
/// assert_eq!(jason.skill("athletics").map(|s| s.rank), Some(0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    id: CharacterId,
    name: CharacterName,
    #[serde(default)]
    kind: CharacterKind,
    #[serde(default)]
    details: CharacterDetails,
    #[serde(default)]
    morphed: bool,
    #[serde(default)]
    essences: EssenceScoreSet,
    /// Keyed by catalog skill id
    #[serde(default)]
    skills: BTreeMap<String, SkillEntry>,
    #[serde(default)]
    resources: ResourcePools,
    #[serde(default)]
    armor: ArmorState,
    #[serde(default)]
    defenses: DefenseSet,
    #[serde(default)]
    items: Vec<CharacterItem>,
}

impl Character {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// A fresh sheet with default base data and every catalog skill untrained.
    pub fn new(name: CharacterName, kind: CharacterKind, catalog: &SkillCatalog) -> Self {
        let mut character = Self {
            id: CharacterId::new(),
            name,
            kind,
            details: CharacterDetails::default(),
            morphed: false,
            essences: EssenceScoreSet::default(),
            skills: BTreeMap::new(),
            resources: ResourcePools::default(),
            armor: ArmorState::default(),
            defenses: DefenseSet::default(),
            items: Vec::new(),
        };
        character.ensure_base_data(catalog);
        character
    }

    /// Build a character from a builder draft and compute its derived data.
    ///
    /// # Errors
    ///
    /// `Validation` when the draft name is not a valid character name.
    pub fn from_draft(catalog: &SkillCatalog, draft: &CharacterDraft) -> Result<Self, DomainError> {
        let name = CharacterName::new(draft.name.as_str())?;
        let mut character = Self::new(name, draft.kind, catalog);
        character.apply_draft(catalog, draft)?;
        Ok(character)
    }

    pub fn with_id(mut self, id: CharacterId) -> Self {
        self.id = id;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> CharacterId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &CharacterName {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> CharacterKind {
        self.kind
    }

    #[inline]
    pub fn details(&self) -> &CharacterDetails {
        &self.details
    }

    #[inline]
    pub fn is_morphed(&self) -> bool {
        self.morphed
    }

    #[inline]
    pub fn essences(&self) -> &EssenceScoreSet {
        &self.essences
    }

    pub fn skill(&self, id: &str) -> Option<&SkillEntry> {
        self.skills.get(id)
    }

    /// Skill entries keyed by id, in id order.
    pub fn skills(&self) -> impl Iterator<Item = (&str, &SkillEntry)> {
        self.skills.iter().map(|(id, entry)| (id.as_str(), entry))
    }

    #[inline]
    pub fn resources(&self) -> &ResourcePools {
        &self.resources
    }

    #[inline]
    pub fn armor(&self) -> &ArmorState {
        &self.armor
    }

    /// Defenses as of the last [`Character::prepare_derived_data`].
    #[inline]
    pub fn defenses(&self) -> &DefenseSet {
        &self.defenses
    }

    pub fn items(&self) -> &[CharacterItem] {
        &self.items
    }

    pub fn item(&self, id: ItemId) -> Option<&CharacterItem> {
        self.items.iter().find(|i| i.id == id)
    }

    // =========================================================================
    // Setters
    // =========================================================================

    pub fn set_name(&mut self, name: CharacterName) {
        self.name = name;
    }

    pub fn set_morphed(&mut self, morphed: bool) {
        self.morphed = morphed;
    }

    pub fn set_essence(&mut self, essence: EssenceKey, value: i32) {
        self.essences.set(essence, value);
    }

    pub fn set_armor(&mut self, armor: ArmorState) {
        self.armor = ArmorState::new(armor.training, armor.bonus_toughness);
    }

    pub fn set_health(&mut self, base: i32, value: i32) {
        self.resources.health.base = base.max(0);
        self.resources.health.value = value.max(0);
    }

    /// Set a skill rank, clamped to the skill's max rank.
    ///
    /// Dropping to rank 0 also drops the specialization flag.
    ///
    /// # Errors
    ///
    /// `UnknownSkill` when the id is not in the catalog.
    pub fn set_skill_rank(
        &mut self,
        catalog: &SkillCatalog,
        skill_id: &str,
        rank: i32,
    ) -> Result<(), DomainError> {
        let definition = catalog.require(skill_id)?;
        let entry = self
            .skills
            .entry(definition.id.to_string())
            .or_insert_with(|| SkillEntry::untrained(definition));
        entry.rank = clamp_rank(rank).min(definition.max_rank);
        entry.specialized = entry.is_effectively_specialized(definition);
        Ok(())
    }

    // =========================================================================
    // Base and derived data
    // =========================================================================

    /// Fill in anything a stored sheet is missing.
    ///
    /// Adds untrained entries for catalog skills the sheet lacks, refreshes
    /// labels and essences from the catalog, clamps ranks, and keeps level at
    /// 1 or above. Existing values are otherwise left alone.
    pub fn ensure_base_data(&mut self, catalog: &SkillCatalog) {
        for definition in catalog.iter() {
            let entry = self
                .skills
                .entry(definition.id.to_string())
                .or_insert_with(|| SkillEntry::untrained(definition));
            definition.label.clone_into(&mut entry.label);
            entry.essence = definition.essence;
            entry.rank = entry.rank.min(definition.max_rank);
        }
        self.details.level = self.details.level.max(1);
    }

    /// Combined rank of skills whose ranks convert into max health.
    pub fn conditioning_rank(&self, catalog: &SkillCatalog) -> i32 {
        catalog
            .converting_to(ResourceConversion::Health)
            .filter_map(|def| self.skills.get(def.id))
            .map(|entry| i32::from(entry.rank))
            .sum()
    }

    /// Inputs for [`derive_stats`] taken from this sheet.
    pub fn derived_stats_input(&self, catalog: &SkillCatalog) -> DerivedStatsInput {
        DerivedStatsInput {
            essences: self.essences,
            armor: self.armor,
            morphed: self.morphed,
            conditioning_rank: self.conditioning_rank(catalog),
            health_base: self.resources.health.base,
        }
    }

    /// Recompute defenses and max health, caching them on the sheet.
    ///
    /// A stored health value above the new max is pulled down to it.
    /// Running this twice on unchanged data gives the same result.
    pub fn prepare_derived_data(&mut self, catalog: &SkillCatalog) -> DerivedStats {
        let derived = derive_stats(&self.derived_stats_input(catalog));
        self.defenses = derived.defenses;
        self.resources.health.apply_max(derived.max_health);
        derived
    }

    // =========================================================================
    // Builder and sheet edits
    // =========================================================================

    /// Overwrite the sheet with a builder draft.
    ///
    /// Ranks are clamped to each skill's max rank and specialization is only
    /// kept where the catalog allows it and the rank is above 0. Skill notes,
    /// items and the character kind survive. Derived data is recomputed.
    ///
    /// # Errors
    ///
    /// `Validation` when the draft name is not a valid character name.
    pub fn apply_draft(
        &mut self,
        catalog: &SkillCatalog,
        draft: &CharacterDraft,
    ) -> Result<DerivedStats, DomainError> {
        self.name = CharacterName::new(draft.name.as_str())?;
        self.details = draft.details.clone();
        self.details.level = self.details.level.max(1);
        self.morphed = draft.morphed;
        self.essences = draft.essences;
        self.armor = ArmorState::new(draft.armor.training, draft.armor.bonus_toughness);
        self.resources = draft.resources;
        self.resources.health.max = 0;

        for definition in catalog.iter() {
            let input = draft.skill(definition.id);
            let entry = self
                .skills
                .entry(definition.id.to_string())
                .or_insert_with(|| SkillEntry::untrained(definition));
            entry.rank = input.rank.min(definition.max_rank);
            entry.specialized = input.specialized && !definition.no_spec && entry.rank > 0;
            entry.specialization = input.specialization;
        }

        self.ensure_base_data(catalog);
        Ok(self.prepare_derived_data(catalog))
    }

    /// Apply a partial sheet edit and recompute derived data.
    ///
    /// # Errors
    ///
    /// `UnknownSkill` when the update names a skill missing from the catalog,
    /// `Validation` for an invalid name. Nothing is changed on error.
    pub fn apply_update(
        &mut self,
        catalog: &SkillCatalog,
        update: SheetUpdate,
    ) -> Result<DerivedStats, DomainError> {
        let name = update.name.map(CharacterName::new).transpose()?;
        let skills = update
            .skills
            .into_iter()
            .map(|(id, patch)| catalog.require(&id).map(|def| (*def, patch)))
            .collect::<Result<Vec<_>, _>>()?;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(level) = update.level {
            self.details.level = level.max(1);
        }
        for (field, value) in update.details {
            field.apply(&mut self.details, value);
        }
        if let Some(morphed) = update.morphed {
            self.morphed = morphed;
        }
        for (essence, value) in update.essences {
            self.essences.set(essence, value);
        }
        if let Some(training) = update.armor_training {
            self.armor.training = training;
        }
        if let Some(bonus) = update.bonus_toughness {
            self.armor.bonus_toughness = bonus.max(0);
        }

        let health = &mut self.resources.health;
        if let Some(base) = update.health_base {
            health.base = base.max(0);
        }
        if let Some(value) = update.health_value {
            health.value = value.max(0);
        }
        let power = &mut self.resources.personal_power;
        if let Some(max) = update.pp_max {
            power.max = max.max(0);
        }
        if let Some(value) = update.pp_value {
            power.value = value.max(0);
        }
        if let Some(movement) = update.movement {
            self.resources.movement.value = movement.max(0);
        }

        for (definition, patch) in skills {
            let entry = self
                .skills
                .entry(definition.id.to_string())
                .or_insert_with(|| SkillEntry::untrained(&definition));
            if let Some(rank) = patch.rank {
                entry.rank = rank.min(definition.max_rank);
            }
            if let Some(specialized) = patch.specialized {
                entry.specialized = specialized;
            }
            if let Some(specialization) = patch.specialization {
                entry.specialization = specialization;
            }
            if let Some(notes) = patch.notes {
                entry.notes = notes;
            }
            entry.specialized = entry.is_effectively_specialized(&definition);
        }

        Ok(self.prepare_derived_data(catalog))
    }

    // =========================================================================
    // Skill checks
    // =========================================================================

    /// Plan a skill check from the current sheet.
    ///
    /// # Errors
    ///
    /// `UnknownSkill` for an id missing from the catalog, `NotRollable` for a
    /// skill that is never rolled.
    pub fn plan_skill_check(
        &self,
        catalog: &SkillCatalog,
        skill_id: &str,
        request: &SkillCheckRequest,
    ) -> Result<SkillCheckPlan, DomainError> {
        let definition = catalog.require(skill_id)?;
        let untrained;
        let entry = match self.skills.get(skill_id) {
            Some(entry) => entry,
            None => {
                untrained = SkillEntry::untrained(definition);
                &untrained
            }
        };
        let essence_value = self.essences.get(definition.essence);
        SkillCheckPlan::new(definition, entry, essence_value, request)
    }

    /// Whether the pre-roll prompt should start with specialization checked.
    ///
    /// # Errors
    ///
    /// `UnknownSkill` for an id missing from the catalog.
    pub fn specialization_default(
        &self,
        catalog: &SkillCatalog,
        skill_id: &str,
    ) -> Result<bool, DomainError> {
        let definition = catalog.require(skill_id)?;
        Ok(self
            .skills
            .get(skill_id)
            .is_some_and(|s| s.specialized && !definition.no_spec))
    }

    // =========================================================================
    // Items
    // =========================================================================

    /// Add a blank item of the given kind and return its id.
    pub fn add_item(&mut self, kind: ItemKind) -> ItemId {
        let item = CharacterItem::blank(kind);
        let id = item.id;
        self.items.push(item);
        id
    }

    /// Remove an item, returning it if it was present.
    pub fn remove_item(&mut self, id: ItemId) -> Option<CharacterItem> {
        let index = self.items.iter().position(|i| i.id == id)?;
        Some(self.items.remove(index))
    }

    /// Items of one kind, in insertion order.
    pub fn items_of_kind(&self, kind: ItemKind) -> impl Iterator<Item = &CharacterItem> {
        self.items.iter().filter(move |i| i.kind == kind)
    }
}

// ============================================================================
// Tests
// ============================================================================
