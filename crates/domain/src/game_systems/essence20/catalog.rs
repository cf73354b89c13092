//! Skill catalog for Essence20.

use crate::error::DomainError;
use crate::value_objects::EssenceKey;

/// Highest rank a skill may reach unless its definition says otherwise.
pub const DEFAULT_MAX_RANK: u8 = 6;

/// A pool a skill's ranks feed instead of being rolled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceConversion {
    /// Each rank adds one point of max health
    Health,
}

/// Static definition of a skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillDefinition {
    /// Machine-readable id (e.g. "athletics")
    pub id: &'static str,
    pub label: &'static str,
    /// Governing essence
    pub essence: EssenceKey,
    /// Never rolled as a skill check
    pub no_roll: bool,
    /// Cannot be specialized
    pub no_spec: bool,
    pub max_rank: u8,
    /// Ranks convert into a resource; such skills do not spend the essence budget
    pub resource: Option<ResourceConversion>,
}

impl SkillDefinition {
    pub const fn new(id: &'static str, label: &'static str, essence: EssenceKey) -> Self {
        Self {
            id,
            label,
            essence,
            no_roll: false,
            no_spec: false,
            max_rank: DEFAULT_MAX_RANK,
            resource: None,
        }
    }

    pub const fn non_rollable(self) -> Self {
        Self {
            no_roll: true,
            ..self
        }
    }

    pub const fn non_specializable(self) -> Self {
        Self {
            no_spec: true,
            ..self
        }
    }

    pub const fn with_max_rank(self, max_rank: u8) -> Self {
        Self { max_rank, ..self }
    }

    pub const fn converts_to(self, resource: ResourceConversion) -> Self {
        Self {
            resource: Some(resource),
            ..self
        }
    }

    /// Whether ranks in this skill count against its essence's budget.
    pub fn spends_essence_budget(&self) -> bool {
        self.resource.is_none()
    }
}

const STANDARD_SKILLS: [SkillDefinition; 21] = [
    // Strength
    SkillDefinition::new("athletics", "Athletics", EssenceKey::Strength),
    SkillDefinition::new("brawn", "Brawn", EssenceKey::Strength),
    SkillDefinition::new("intimidation", "Intimidation", EssenceKey::Strength),
    SkillDefinition::new("might", "Might", EssenceKey::Strength),
    SkillDefinition::new("conditioning", "Conditioning", EssenceKey::Strength)
        .non_rollable()
        .non_specializable()
        .with_max_rank(6)
        .converts_to(ResourceConversion::Health),
    // Speed
    SkillDefinition::new("acrobatics", "Acrobatics", EssenceKey::Speed),
    SkillDefinition::new("driving", "Driving", EssenceKey::Speed),
    SkillDefinition::new("finesse", "Finesse", EssenceKey::Speed),
    SkillDefinition::new("infiltration", "Infiltration", EssenceKey::Speed),
    SkillDefinition::new("initiative", "Initiative", EssenceKey::Speed),
    SkillDefinition::new("targeting", "Targeting", EssenceKey::Speed),
    // Smarts
    SkillDefinition::new("alertness", "Alertness", EssenceKey::Smarts),
    SkillDefinition::new("culture", "Culture", EssenceKey::Smarts),
    SkillDefinition::new("science", "Science", EssenceKey::Smarts),
    SkillDefinition::new("survival", "Survival", EssenceKey::Smarts),
    SkillDefinition::new("technology", "Technology", EssenceKey::Smarts),
    // Social
    SkillDefinition::new("animalHandling", "Animal Handling", EssenceKey::Social),
    SkillDefinition::new("deception", "Deception", EssenceKey::Social),
    SkillDefinition::new("performance", "Performance", EssenceKey::Social),
    SkillDefinition::new("persuasion", "Persuasion", EssenceKey::Social),
    SkillDefinition::new("streetwise", "Streetwise", EssenceKey::Social),
];

/// Ordered table of skill definitions.
///
/// Iteration order is the catalog order; validation warnings follow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillCatalog {
    skills: Vec<SkillDefinition>,
}

impl Default for SkillCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl SkillCatalog {
    /// The core rulebook skills.
    pub fn standard() -> Self {
        Self::new(STANDARD_SKILLS.to_vec())
    }

    pub fn new(skills: Vec<SkillDefinition>) -> Self {
        Self { skills }
    }

    pub fn get(&self, id: &str) -> Option<&SkillDefinition> {
        self.skills.iter().find(|s| s.id == id)
    }

    /// Look up a skill, failing with `UnknownSkill` when absent.
    pub fn require(&self, id: &str) -> Result<&SkillDefinition, DomainError> {
        self.get(id).ok_or_else(|| DomainError::unknown_skill(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &SkillDefinition> {
        self.skills.iter()
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Skills governed by one essence, sorted by label.
    pub fn by_essence(&self, essence: EssenceKey) -> Vec<&SkillDefinition> {
        let mut group: Vec<&SkillDefinition> =
            self.skills.iter().filter(|s| s.essence == essence).collect();
        group.sort_by(|a, b| a.label.cmp(b.label));
        group
    }

    /// Skills whose ranks convert into the given resource.
    pub fn converting_to(
        &self,
        resource: ResourceConversion,
    ) -> impl Iterator<Item = &SkillDefinition> {
        self.skills
            .iter()
            .filter(move |s| s.resource == Some(resource))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_has_all_skills() {
        let catalog = SkillCatalog::standard();
        assert_eq!(catalog.len(), 21);
        assert_eq!(catalog.by_essence(EssenceKey::Speed).len(), 6);
    }

    #[test]
    fn conditioning_is_flagged() {
        let catalog = SkillCatalog::standard();
        let conditioning = catalog.require("conditioning").unwrap();
        assert!(conditioning.no_roll);
        assert!(conditioning.no_spec);
        assert!(!conditioning.spends_essence_budget());
        assert_eq!(
            catalog
                .converting_to(ResourceConversion::Health)
                .map(|s| s.id)
                .collect::<Vec<_>>(),
            vec!["conditioning"]
        );
    }

    #[test]
    fn unknown_skill_is_an_error() {
        let catalog = SkillCatalog::standard();
        assert_eq!(
            catalog.require("juggling"),
            Err(DomainError::unknown_skill("juggling"))
        );
    }

    #[test]
    fn groups_are_sorted_by_label() {
        let catalog = SkillCatalog::standard();
        let labels: Vec<_> = catalog
            .by_essence(EssenceKey::Strength)
            .iter()
            .map(|s| s.label)
            .collect();
        assert_eq!(
            labels,
            vec!["Athletics", "Brawn", "Conditioning", "Intimidation", "Might"]
        );
    }

    #[test]
    fn catalog_order_is_definition_order() {
        let catalog = SkillCatalog::standard();
        let first: Vec<_> = catalog.iter().take(5).map(|s| s.id).collect();
        assert_eq!(
            first,
            vec!["athletics", "brawn", "intimidation", "might", "conditioning"]
        );
    }
}
