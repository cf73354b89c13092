//! Unified error types for the domain layer
//!
//! Validation warnings raised while building a character are not errors; see
//! [`crate::game_systems::CreationWarning`].

use thiserror::Error;

use crate::value_objects::DiceParseError;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),

    /// The skill id is not part of the catalog
    #[error("Unknown skill: {0}")]
    UnknownSkill(String),

    /// The skill exists but is never rolled as a check (e.g. conditioning)
    #[error("{label} isn't rolled as a normal skill check.")]
    NotRollable { skill: String, label: String },
}

impl DomainError {
    /// Creates a validation error for business rule violations.
    ///
    /// # Example
    /// ```ignore
    /// if name.is_empty() {
    ///     return Err(DomainError::validation("Character name cannot be empty"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create an unknown skill error
    pub fn unknown_skill(skill: impl Into<String>) -> Self {
        Self::UnknownSkill(skill.into())
    }

    /// Create a not rollable error
    pub fn not_rollable(skill: impl Into<String>, label: impl Into<String>) -> Self {
        Self::NotRollable {
            skill: skill.into(),
            label: label.into(),
        }
    }

    /// Whether this error is a refusal to roll rather than a broken request.
    pub fn is_roll_refusal(&self) -> bool {
        matches!(self, Self::NotRollable { .. } | Self::UnknownSkill(_))
    }
}

impl From<DiceParseError> for DomainError {
    fn from(err: DiceParseError) -> Self {
        Self::Parse(err.to_string())
    }
}
