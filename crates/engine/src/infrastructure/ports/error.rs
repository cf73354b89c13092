//! Error types for port operations.

/// Repository operation errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// Entity not found - includes entity type and ID for actionable error messages.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Business constraint violated.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

impl RepoError {
    /// Create a NotFound error with entity type and ID context.
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Create a ConstraintViolation error.
    pub fn constraint(message: impl ToString) -> Self {
        Self::ConstraintViolation(message.to_string())
    }

    /// Check if this is a NotFound error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum DiceRollError {
    #[error("Dice evaluation failed for {formula}: {message}")]
    Evaluation { formula: String, message: String },
    #[error("Dice roller unavailable")]
    Unavailable,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum LogError {
    #[error("Message log rejected entry: {0}")]
    Rejected(String),
    #[error("Message log unavailable")]
    Unavailable,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum DialogError {
    #[error("Dialog could not be shown: {0}")]
    Render(String),
}
