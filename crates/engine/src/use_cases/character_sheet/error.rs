//! Character sheet operation errors.

use crate::infrastructure::ports::RepoError;
use pr20_domain::{CharacterId, DomainError, ItemId};

/// Errors that can occur during character sheet operations.
#[derive(Debug, thiserror::Error)]
pub enum CharacterSheetError {
    #[error("Character not found: {0}")]
    CharacterNotFound(CharacterId),

    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
