//! Character builder errors.

use crate::infrastructure::ports::{DialogError, RepoError};
use pr20_domain::{CharacterId, DomainError};

/// Errors that can occur while committing a builder draft.
#[derive(Debug, thiserror::Error)]
pub enum CharacterBuilderError {
    #[error("Character not found: {0}")]
    CharacterNotFound(CharacterId),

    #[error("Validation error: {0}")]
    Domain(#[from] DomainError),

    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),

    #[error("Dialog error: {0}")]
    Dialog(#[from] DialogError),
}
