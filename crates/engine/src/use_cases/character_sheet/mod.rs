//! Character sheet use cases.
//!
//! Handles viewing a sheet, applying sheet edits, item ownership, and
//! listing characters.

mod error;

pub use error::CharacterSheetError;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use pr20_domain::{
    parse_sheet_update, Character, CharacterId, CharacterItem, CharacterKind, DerivedStats,
    Essence20System, FormData, ItemId, ItemKind, SheetView,
};

use crate::infrastructure::ports::CharacterRepo;

// =============================================================================
// Result Types
// =============================================================================

/// A sheet ready to render, with the stats derived for it.
#[derive(Debug, Clone)]
pub struct PreparedSheet {
    pub view: SheetView,
    pub derived: DerivedStats,
}

/// One line of the character list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterSummary {
    pub id: CharacterId,
    pub name: String,
    pub kind: CharacterKind,
    pub level: i32,
    pub morphed: bool,
}

impl From<&Character> for CharacterSummary {
    fn from(character: &Character) -> Self {
        Self {
            id: character.id(),
            name: character.name().to_string(),
            kind: character.kind(),
            level: character.details().level,
            morphed: character.is_morphed(),
        }
    }
}

// =============================================================================
// Use Cases
// =============================================================================

/// Container for character sheet use cases.
pub struct CharacterSheetUseCases {
    character_repo: Arc<dyn CharacterRepo>,
    system: Arc<Essence20System>,
}

impl CharacterSheetUseCases {
    pub fn new(character_repo: Arc<dyn CharacterRepo>, system: Arc<Essence20System>) -> Self {
        Self {
            character_repo,
            system,
        }
    }

    async fn load(&self, character_id: CharacterId) -> Result<Character, CharacterSheetError> {
        let mut character = self
            .character_repo
            .get(character_id)
            .await?
            .ok_or(CharacterSheetError::CharacterNotFound(character_id))?;
        character.ensure_base_data(self.system.catalog());
        Ok(character)
    }

    /// Prepare a sheet for display.
    ///
    /// Fills in base data and recomputes derived data on a copy. Nothing is
    /// written back; corrections such as a health value above max are
    /// persisted with the next edit.
    pub async fn prepare(
        &self,
        character_id: CharacterId,
    ) -> Result<PreparedSheet, CharacterSheetError> {
        let mut character = self.load(character_id).await?;
        let derived = character.prepare_derived_data(self.system.catalog());
        Ok(PreparedSheet {
            view: SheetView::build(&character, self.system.catalog()),
            derived,
        })
    }

    /// Apply a sheet form submission and save.
    ///
    /// Unknown skill keys reject the whole submission.
    pub async fn update(
        &self,
        character_id: CharacterId,
        form: &FormData,
    ) -> Result<PreparedSheet, CharacterSheetError> {
        let catalog = self.system.catalog();
        let mut character = self.load(character_id).await?;
        let update = parse_sheet_update(catalog, form)?;
        let derived = character.apply_update(catalog, update)?;
        self.character_repo.update(&character).await?;

        tracing::info!(
            character_id = %character_id,
            fields = form.keys().count(),
            max_health = derived.max_health,
            "Character sheet updated"
        );

        Ok(PreparedSheet {
            view: SheetView::build(&character, catalog),
            derived,
        })
    }

    /// Add a blank item of `kind`, named "New <kind>".
    pub async fn add_item(
        &self,
        character_id: CharacterId,
        kind: ItemKind,
    ) -> Result<CharacterItem, CharacterSheetError> {
        let mut character = self.load(character_id).await?;
        let item_id = character.add_item(kind);
        let item = character
            .item(item_id)
            .cloned()
            .ok_or(CharacterSheetError::ItemNotFound(item_id))?;
        self.character_repo.update(&character).await?;

        tracing::info!(
            character_id = %character_id,
            item_id = %item_id,
            kind = %kind,
            "Item added to character"
        );
        Ok(item)
    }

    /// Remove an owned item.
    pub async fn remove_item(
        &self,
        character_id: CharacterId,
        item_id: ItemId,
    ) -> Result<CharacterItem, CharacterSheetError> {
        let mut character = self.load(character_id).await?;
        let item = character
            .remove_item(item_id)
            .ok_or(CharacterSheetError::ItemNotFound(item_id))?;
        self.character_repo.update(&character).await?;

        tracing::info!(
            character_id = %character_id,
            item_id = %item_id,
            "Item removed from character"
        );
        Ok(item)
    }

    /// All characters, sorted by name.
    pub async fn list(&self) -> Result<Vec<CharacterSummary>, CharacterSheetError> {
        let characters = self.character_repo.list().await?;
        Ok(characters.iter().map(CharacterSummary::from).collect())
    }
}
