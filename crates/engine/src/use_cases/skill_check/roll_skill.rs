//! Roll skill use case.
//!
//! Plans a check from the stored sheet, evaluates every die through the
//! die-roll port, and posts the summary to the message log.

use std::sync::Arc;

use pr20_domain::{
    CharacterId, Essence20System, PoolRoll, SkillCheckOutcome, SkillCheckPlan, SkillCheckRequest,
};

use crate::infrastructure::ports::{CharacterRepo, DieRollerPort, MessageLogPort};

use super::error::SkillCheckError;

/// A finished check, as posted to the log.
#[derive(Debug, Clone)]
pub struct SkillCheckResult {
    pub plan: SkillCheckPlan,
    pub outcome: SkillCheckOutcome,
    pub summary: String,
}

/// Roll skill use case.
///
/// Orchestrates: character lookup, check planning, die evaluation, log post.
pub struct RollSkill {
    characters: Arc<dyn CharacterRepo>,
    dice: Arc<dyn DieRollerPort>,
    log: Arc<dyn MessageLogPort>,
    system: Arc<Essence20System>,
}

impl RollSkill {
    pub fn new(
        characters: Arc<dyn CharacterRepo>,
        dice: Arc<dyn DieRollerPort>,
        log: Arc<dyn MessageLogPort>,
        system: Arc<Essence20System>,
    ) -> Self {
        Self {
            characters,
            dice,
            log,
            system,
        }
    }

    /// Roll `skill_id` for a character.
    ///
    /// An unknown or non-rollable skill is refused before any die is
    /// evaluated and nothing is posted.
    pub async fn execute(
        &self,
        character_id: CharacterId,
        skill_id: &str,
        request: SkillCheckRequest,
    ) -> Result<SkillCheckResult, SkillCheckError> {
        let mut character = self
            .characters
            .get(character_id)
            .await?
            .ok_or(SkillCheckError::CharacterNotFound(character_id))?;
        let catalog = self.system.catalog();
        character.ensure_base_data(catalog);

        let plan = match character.plan_skill_check(catalog, skill_id, &request) {
            Ok(plan) => plan,
            Err(e) => {
                tracing::warn!(
                    character_id = %character_id,
                    skill = %skill_id,
                    error = %e,
                    "Skill check refused"
                );
                return Err(e.into());
            }
        };

        let d20_total = self.dice.evaluate(&plan.d20_formula()).await?;
        let mut pool = Vec::with_capacity(plan.pool.len());
        for formula in &plan.pool {
            let total = self.dice.evaluate(formula).await?;
            pool.push(PoolRoll {
                formula: formula.clone(),
                total,
            });
        }
        let outcome = plan.resolve(d20_total, pool);

        let speaker = character.name().as_str();
        let summary = plan.summary(speaker, &outcome);
        self.log.post(speaker, &summary).await?;

        tracing::info!(
            character_id = %character_id,
            skill = %plan.skill_id,
            d20 = %plan.d20,
            grand_total = outcome.grand_total,
            auto_snag = plan.auto_snag_note,
            "Skill check resolved"
        );

        Ok(SkillCheckResult {
            plan,
            outcome,
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{
        DiceRollError, LogError, MockCharacterRepo, MockDieRollerPort, MockMessageLogPort,
    };
    use pr20_domain::{Character, CharacterKind, CharacterName, EssenceKey};

    fn ranger(system: &Essence20System) -> Character {
        let mut c = Character::new(
            CharacterName::new("Jason").unwrap(),
            CharacterKind::Character,
            system.catalog(),
        );
        c.set_essence(EssenceKey::Strength, 3);
        c.set_skill_rank(system.catalog(), "athletics", 2).unwrap();
        c
    }

    fn repo_with(character: Character) -> MockCharacterRepo {
        let mut repo = MockCharacterRepo::new();
        repo.expect_get()
            .returning(move |_| Ok(Some(character.clone())));
        repo
    }

    #[tokio::test]
    async fn rolls_d20_then_pool_and_posts_summary() {
        let system = Arc::new(Essence20System::default());
        let character = ranger(&system);
        let id = character.id();

        let mut dice = MockDieRollerPort::new();
        dice.expect_evaluate()
            .returning(|f| Ok(if f.die_size == 20 { 12 } else { 3 }));

        let mut log = MockMessageLogPort::new();
        log.expect_post()
            .withf(|speaker, content| {
                speaker == "Jason"
                    && content.starts_with("Jason: Athletics\n")
                    && content.contains("d20=12 + strength(3) + skill(3) = 18")
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let use_case = RollSkill::new(
            Arc::new(repo_with(character)),
            Arc::new(dice),
            Arc::new(log),
            system,
        );
        let result = use_case
            .execute(id, "athletics", SkillCheckRequest::default())
            .await
            .unwrap();

        assert_eq!(result.outcome.grand_total, 18);
        assert_eq!(result.outcome.pool.len(), 1);
        assert_eq!(result.outcome.pool[0].formula.to_string(), "1d4");
    }

    #[tokio::test]
    async fn non_rollable_skill_posts_nothing() {
        let system = Arc::new(Essence20System::default());
        let character = ranger(&system);
        let id = character.id();

        let mut dice = MockDieRollerPort::new();
        dice.expect_evaluate().never();
        let mut log = MockMessageLogPort::new();
        log.expect_post().never();

        let use_case = RollSkill::new(
            Arc::new(repo_with(character)),
            Arc::new(dice),
            Arc::new(log),
            system,
        );
        let err = use_case
            .execute(id, "conditioning", SkillCheckRequest::default())
            .await
            .unwrap_err();

        assert!(err.is_refusal());
        assert_eq!(
            err.to_string(),
            "Conditioning isn't rolled as a normal skill check."
        );
    }

    #[tokio::test]
    async fn unknown_skill_is_refused() {
        let system = Arc::new(Essence20System::default());
        let character = ranger(&system);
        let id = character.id();

        let mut log = MockMessageLogPort::new();
        log.expect_post().never();

        let use_case = RollSkill::new(
            Arc::new(repo_with(character)),
            Arc::new(MockDieRollerPort::new()),
            Arc::new(log),
            system,
        );
        let err = use_case
            .execute(id, "juggling", SkillCheckRequest::default())
            .await
            .unwrap_err();
        assert!(err.is_refusal());
    }

    #[tokio::test]
    async fn untrained_check_rolls_snag_and_notes_it() {
        let system = Arc::new(Essence20System::default());
        let character = ranger(&system);
        let id = character.id();

        let mut dice = MockDieRollerPort::new();
        dice.expect_evaluate()
            .withf(|f| f.to_string() == "2d20kl1")
            .times(1)
            .returning(|_| Ok(7));

        let mut log = MockMessageLogPort::new();
        log.expect_post()
            .withf(|_, content| {
                content.ends_with("Skill dice: -\nUntrained: Snag applied automatically.")
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let use_case = RollSkill::new(
            Arc::new(repo_with(character)),
            Arc::new(dice),
            Arc::new(log),
            system,
        );
        let result = use_case
            .execute(id, "might", SkillCheckRequest::default())
            .await
            .unwrap();

        assert_eq!(result.outcome.grand_total, 10);
        assert!(result.plan.auto_snag_note);
    }

    #[tokio::test]
    async fn missing_character_is_not_found() {
        let mut repo = MockCharacterRepo::new();
        repo.expect_get().returning(|_| Ok(None));

        let use_case = RollSkill::new(
            Arc::new(repo),
            Arc::new(MockDieRollerPort::new()),
            Arc::new(MockMessageLogPort::new()),
            Arc::new(Essence20System::default()),
        );
        let result = use_case
            .execute(CharacterId::new(), "athletics", SkillCheckRequest::default())
            .await;
        assert!(matches!(result, Err(SkillCheckError::CharacterNotFound(_))));
    }

    #[tokio::test]
    async fn dice_failure_posts_nothing() {
        let system = Arc::new(Essence20System::default());
        let character = ranger(&system);
        let id = character.id();

        let mut dice = MockDieRollerPort::new();
        dice.expect_evaluate()
            .times(1)
            .returning(|_| Err(DiceRollError::Unavailable));
        let mut log = MockMessageLogPort::new();
        log.expect_post().never();

        let use_case = RollSkill::new(
            Arc::new(repo_with(character)),
            Arc::new(dice),
            Arc::new(log),
            system,
        );
        let result = use_case
            .execute(id, "athletics", SkillCheckRequest::default())
            .await;
        assert!(matches!(result, Err(SkillCheckError::Dice(_))));
    }

    #[tokio::test]
    async fn rejected_log_post_is_an_error() {
        let system = Arc::new(Essence20System::default());
        let character = ranger(&system);
        let id = character.id();

        let mut dice = MockDieRollerPort::new();
        dice.expect_evaluate().returning(|_| Ok(1));
        let mut log = MockMessageLogPort::new();
        log.expect_post()
            .times(1)
            .returning(|_, _| Err(LogError::Rejected("chat is closed".into())));

        let use_case = RollSkill::new(
            Arc::new(repo_with(character)),
            Arc::new(dice),
            Arc::new(log),
            system,
        );
        let err = use_case
            .execute(id, "athletics", SkillCheckRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SkillCheckError::Log(_)));
        assert!(!err.is_refusal());
    }
}
