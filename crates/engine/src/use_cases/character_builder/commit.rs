//! Commit draft use case.
//!
//! Second phase of the builder: a draft with warnings is only written when
//! the caller has chosen to proceed.

use std::sync::Arc;

use pr20_domain::{Character, CharacterDraft, CharacterId, CreationWarning, Essence20System};

use crate::infrastructure::ports::CharacterRepo;

use super::error::CharacterBuilderError;

/// What happened to a submitted draft.
#[derive(Debug, Clone)]
pub enum BuilderOutcome {
    /// Saved. Carries the warnings the user proceeded past.
    Committed {
        character: Character,
        warnings: Vec<CreationWarning>,
    },
    /// Warnings were present and the user did not confirm.
    Unconfirmed { warnings: Vec<CreationWarning> },
}

impl BuilderOutcome {
    pub fn character(&self) -> Option<&Character> {
        match self {
            Self::Committed { character, .. } => Some(character),
            Self::Unconfirmed { .. } => None,
        }
    }

    pub fn warnings(&self) -> &[CreationWarning] {
        match self {
            Self::Committed { warnings, .. } | Self::Unconfirmed { warnings } => warnings,
        }
    }
}

/// Commit draft use case.
pub struct CommitDraft {
    characters: Arc<dyn CharacterRepo>,
    system: Arc<Essence20System>,
}

impl CommitDraft {
    pub fn new(characters: Arc<dyn CharacterRepo>, system: Arc<Essence20System>) -> Self {
        Self { characters, system }
    }

    /// Write a draft as a new character, or over `target` when the builder
    /// was opened for an existing one.
    ///
    /// # Arguments
    /// * `draft` - Parsed builder input
    /// * `target` - Character the builder was opened for, if any
    /// * `proceed` - Whether the user accepted any warnings
    pub async fn execute(
        &self,
        draft: &CharacterDraft,
        target: Option<CharacterId>,
        proceed: bool,
    ) -> Result<BuilderOutcome, CharacterBuilderError> {
        let warnings = self.system.validate(draft);
        if !warnings.is_empty() && !proceed {
            tracing::debug!(
                warnings = warnings.len(),
                "Draft not committed, warnings unconfirmed"
            );
            return Ok(BuilderOutcome::Unconfirmed { warnings });
        }

        let catalog = self.system.catalog();
        let character = match target {
            Some(id) => {
                let mut character = self
                    .characters
                    .get(id)
                    .await?
                    .ok_or(CharacterBuilderError::CharacterNotFound(id))?;
                character.apply_draft(catalog, draft)?;
                self.characters.update(&character).await?;
                character
            }
            None => {
                let character = Character::from_draft(catalog, draft)?;
                self.characters.create(&character).await?;
                character
            }
        };

        tracing::info!(
            character_id = %character.id(),
            name = %character.name(),
            updated = target.is_some(),
            warnings = warnings.len(),
            "Character draft committed"
        );

        Ok(BuilderOutcome::Committed {
            character,
            warnings,
        })
    }
}
