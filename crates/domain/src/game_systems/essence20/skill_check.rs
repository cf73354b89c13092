//! Skill check planning and resolution.
//!
//! A check is split in two steps so the dice can be evaluated elsewhere:
//! [`SkillCheckPlan::new`] decides what to roll, and
//! [`SkillCheckPlan::resolve`] turns the rolled totals into an outcome.

use serde::{Deserialize, Serialize};

use super::catalog::SkillDefinition;
use super::dice_pool::{build_dice_pool, clamp_rank};
use crate::entities::SkillEntry;
use crate::error::DomainError;
use crate::value_objects::{D20Shape, DiceFormula, EssenceKey};

/// Largest flat bonus (in either direction) a check accepts.
pub const MAX_FLAT_BONUS: i32 = 999;

const AUTO_SNAG_NOTE: &str = "Untrained: Snag applied automatically.";

/// Options chosen for one check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SkillCheckRequest {
    pub edge: bool,
    pub snag: bool,
    pub bonus: i32,
    /// Overrides the stored specialization flag when set
    pub specialized_override: Option<bool>,
}

impl SkillCheckRequest {
    pub fn with_edge(mut self) -> Self {
        self.edge = true;
        self
    }

    pub fn with_snag(mut self) -> Self {
        self.snag = true;
        self
    }

    pub fn with_bonus(mut self, bonus: i32) -> Self {
        self.bonus = bonus;
        self
    }

    pub fn with_specialized(mut self, specialized: bool) -> Self {
        self.specialized_override = Some(specialized);
        self
    }
}

/// What to roll for a check, decided before any die is evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillCheckPlan {
    pub skill_id: String,
    pub skill_label: String,
    pub essence: EssenceKey,
    pub essence_value: i32,
    pub rank: u8,
    pub specialized: bool,
    /// Free-text specialization name, if specialized and named
    pub specialization: Option<String>,
    pub d20: D20Shape,
    pub pool: Vec<DiceFormula>,
    /// Flat bonus, already clamped
    pub bonus: i32,
    /// Rank 0 forced a snag and the caller did not pass both edge and snag
    pub auto_snag_note: bool,
}

impl SkillCheckPlan {
    /// Decide the dice for a check.
    ///
    /// Rank 0 forces a snag. The d20 shape uses the effective flags, so an
    /// untrained check with edge rolls a single d20. Specialization comes from
    /// the override or the stored flag, but never applies to a `no_spec`
    /// skill or at rank 0.
    ///
    /// # Errors
    ///
    /// `NotRollable` when the catalog marks the skill as never rolled.
    pub fn new(
        skill: &SkillDefinition,
        entry: &SkillEntry,
        essence_value: i32,
        request: &SkillCheckRequest,
    ) -> Result<Self, DomainError> {
        if skill.no_roll {
            return Err(DomainError::not_rollable(skill.id, skill.label));
        }

        let rank = clamp_rank(entry.rank.into());
        let auto_snag = rank == 0;
        let snag = request.snag || auto_snag;
        let d20 = D20Shape::from_flags(request.edge, snag);

        let requested = request.specialized_override.unwrap_or(entry.specialized);
        let specialized = requested && !skill.no_spec && rank > 0;
        let pool = build_dice_pool(skill, rank.into(), specialized)?;

        let specialization = (specialized && !entry.specialization.trim().is_empty())
            .then(|| entry.specialization.trim().to_string());

        Ok(Self {
            skill_id: skill.id.to_string(),
            skill_label: skill.label.to_string(),
            essence: skill.essence,
            essence_value: essence_value.max(0),
            rank,
            specialized,
            specialization,
            d20,
            pool,
            bonus: request.bonus.clamp(-MAX_FLAT_BONUS, MAX_FLAT_BONUS),
            auto_snag_note: auto_snag && !(request.edge && request.snag),
        })
    }

    /// The d20 formula to evaluate.
    pub fn d20_formula(&self) -> DiceFormula {
        self.d20.formula()
    }

    /// Combine evaluated totals into the outcome.
    ///
    /// `pool` holds one entry per formula in [`Self::pool`], in order.
    pub fn resolve(&self, d20_total: i32, pool: Vec<PoolRoll>) -> SkillCheckOutcome {
        let max_skill_die = pool.iter().map(|r| r.total).max().unwrap_or(0);
        SkillCheckOutcome {
            grand_total: d20_total
                .saturating_add(self.essence_value)
                .saturating_add(max_skill_die)
                .saturating_add(self.bonus),
            d20_total,
            essence_value: self.essence_value,
            max_skill_die,
            bonus: self.bonus,
            pool,
        }
    }

    /// Evaluate every die with a synchronous roller and resolve.
    pub fn roll_with(&self, mut evaluate: impl FnMut(&DiceFormula) -> i32) -> SkillCheckOutcome {
        let d20_total = evaluate(&self.d20_formula());
        let pool = self
            .pool
            .iter()
            .map(|formula| PoolRoll {
                formula: formula.clone(),
                total: evaluate(formula),
            })
            .collect();
        self.resolve(d20_total, pool)
    }

    /// Human-readable summary for the message log.
    pub fn summary(&self, speaker: &str, outcome: &SkillCheckOutcome) -> String {
        let spec_tag = match (&self.specialization, self.specialized) {
            (Some(name), _) => format!(" - {}", name),
            (None, true) => " - Specialized".to_string(),
            (None, false) => String::new(),
        };
        let bonus = if outcome.bonus != 0 {
            format!(" + bonus({})", outcome.bonus)
        } else {
            String::new()
        };
        let dice_line = if outcome.pool.is_empty() {
            "-".to_string()
        } else {
            outcome
                .pool
                .iter()
                .map(|r| format!("{}={}", r.formula, r.total))
                .collect::<Vec<_>>()
                .join(", ")
        };

        let mut lines = vec![
            format!("{}: {}{}", speaker, self.skill_label, spec_tag),
            format!(
                "d20={} + {}({}) + skill({}){} = {}",
                outcome.d20_total,
                self.essence,
                outcome.essence_value,
                outcome.max_skill_die,
                bonus,
                outcome.grand_total
            ),
            format!("Skill dice: {}", dice_line),
        ];
        if self.auto_snag_note {
            lines.push(AUTO_SNAG_NOTE.to_string());
        }
        lines.join("\n")
    }
}

/// One evaluated skill die.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolRoll {
    pub formula: DiceFormula,
    pub total: i32,
}

/// Result of a resolved check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillCheckOutcome {
    pub grand_total: i32,
    pub d20_total: i32,
    pub essence_value: i32,
    pub max_skill_die: i32,
    pub bonus: i32,
    pub pool: Vec<PoolRoll>,
}
