//! Domain entities - Objects owned by a character

mod item;
mod skill;

pub use item::{CharacterItem, ItemKind};
pub use skill::SkillEntry;
