//! Skill dice pools.
//!
//! A skill's rank picks a die from the rank table. Specialized skills roll a
//! "staircase": one die for every rank from 1 up to the current rank.

use super::catalog::SkillDefinition;
use crate::error::DomainError;
use crate::value_objects::DiceFormula;

/// Die size per rank. Index 0 is untrained and rolls nothing.
pub const RANK_DICE: [Option<u8>; 7] = [None, Some(2), Some(4), Some(6), Some(8), Some(10), Some(12)];

/// Clamp a rank into the range covered by [`RANK_DICE`].
pub fn clamp_rank(rank: i32) -> u8 {
    rank.clamp(0, (RANK_DICE.len() - 1) as i32) as u8
}

/// The single die rolled at a rank, if any.
pub fn rank_to_die(rank: i32) -> Option<DiceFormula> {
    RANK_DICE[clamp_rank(rank) as usize].map(DiceFormula::single)
}

/// One die per rank level from 1 to `rank`, smallest first.
pub fn staircase_dice(rank: i32) -> Vec<DiceFormula> {
    (1..=clamp_rank(rank) as usize)
        .filter_map(|r| RANK_DICE[r].map(DiceFormula::single))
        .collect()
}

/// Build the ordered pool of skill dice for a check.
///
/// # Errors
///
/// `NotRollable` when the catalog marks the skill as never rolled.
pub fn build_dice_pool(
    skill: &SkillDefinition,
    rank: i32,
    specialized: bool,
) -> Result<Vec<DiceFormula>, DomainError> {
    if skill.no_roll {
        return Err(DomainError::not_rollable(skill.id, skill.label));
    }

    let rank = clamp_rank(rank);
    if specialized && !skill.no_spec && rank > 0 {
        Ok(staircase_dice(rank.into()))
    } else {
        Ok(rank_to_die(rank.into()).into_iter().collect())
    }
}
