//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - The document store holding character sheets
//! - Die-roll evaluation (the host's roller, or the bundled random one)
//! - The shared message log that receives roll summaries
//! - Modal dialogs (pre-roll options, "proceed with warnings?")
//! - Random (for testing)

mod error;
mod external;
mod repos;
mod testing;

// =============================================================================
// Repository Ports
// =============================================================================
pub use repos::CharacterRepo;

// =============================================================================
// External Service Ports
// =============================================================================
pub use external::{
    Dialog, DialogButton, DialogField, DialogPort, DialogResponse, DieRollerPort, LogEntry,
    MessageLogPort, SelectOption, PROCEED_BUTTON, ROLL_BUTTON,
};

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use repos::MockCharacterRepo;

#[cfg(test)]
pub use external::{MockDialogPort, MockDieRollerPort, MockMessageLogPort};

#[cfg(test)]
pub use testing::MockRandomPort;

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::RandomPort;

// =============================================================================
// Error Types
// =============================================================================
pub use error::{DialogError, DiceRollError, LogError, RepoError};
