//! Skill check errors.

use crate::infrastructure::ports::{DialogError, DiceRollError, LogError, RepoError};
use pr20_domain::{CharacterId, DomainError};

/// Errors that can occur while rolling a skill check.
#[derive(Debug, thiserror::Error)]
pub enum SkillCheckError {
    #[error("Character not found: {0}")]
    CharacterNotFound(CharacterId),

    /// Unknown or non-rollable skill. Nothing was rolled or posted.
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),

    #[error("Dice error: {0}")]
    Dice(#[from] DiceRollError),

    #[error("Message log error: {0}")]
    Log(#[from] LogError),

    #[error("Dialog error: {0}")]
    Dialog(#[from] DialogError),
}

impl SkillCheckError {
    /// The check was refused before any die was rolled.
    pub fn is_refusal(&self) -> bool {
        matches!(self, Self::Domain(e) if e.is_roll_refusal())
    }
}
