//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific area of the rules.
//! Use cases orchestrate the domain rules and the ports to fulfill user stories.

pub mod character_builder;
pub mod character_sheet;
pub mod skill_check;

// Re-export main types
pub use character_builder::CharacterBuilderUseCases;
pub use character_sheet::CharacterSheetUseCases;
pub use skill_check::SkillCheckUseCases;
