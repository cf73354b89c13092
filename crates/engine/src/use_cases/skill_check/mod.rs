//! Skill check use cases.
//!
//! Rolling a skill from a sheet, either directly with known options or
//! behind the pre-roll options prompt.

mod error;
mod prompt_roll;
mod roll_skill;

pub use error::SkillCheckError;
pub use prompt_roll::PromptSkillRoll;
pub use roll_skill::{RollSkill, SkillCheckResult};

use std::sync::Arc;

/// Container for skill check use cases.
pub struct SkillCheckUseCases {
    pub roll: Arc<RollSkill>,
    pub prompt: Arc<PromptSkillRoll>,
}

impl SkillCheckUseCases {
    pub fn new(roll: Arc<RollSkill>, prompt: Arc<PromptSkillRoll>) -> Self {
        Self { roll, prompt }
    }
}
