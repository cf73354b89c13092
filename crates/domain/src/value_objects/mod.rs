//! Value objects - Immutable objects defined by their attributes

mod armor;
mod defense;
mod details;
mod dice;
mod essence;
mod names;
mod resources;

pub use armor::{ArmorState, ArmorTraining};
pub use defense::{DefenseKind, DefenseScore, DefenseSet, DEFENSE_BASE};
pub use details::{CharacterDetails, CharacterKind};
pub use dice::{D20Shape, DiceFormula, DiceParseError, KeepRule};
pub use essence::{EssenceKey, EssenceScoreSet, DEFAULT_ESSENCE_VALUE};
pub use names::CharacterName;
pub use resources::{HealthPool, Movement, PersonalPower, ResourcePools, DEFAULT_MOVEMENT};
