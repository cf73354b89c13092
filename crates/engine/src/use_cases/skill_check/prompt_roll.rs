//! Prompted roll use case.
//!
//! Rolling from a sheet first asks for the roll mode, a flat bonus and the
//! specialization toggle. Dismissing or cancelling the prompt rolls nothing.

use std::sync::Arc;

use pr20_domain::common::{clamp_to, parse_number};
use pr20_domain::{
    CharacterId, DomainError, Essence20System, FormData, SkillCheckRequest, MAX_FLAT_BONUS,
};

use crate::infrastructure::ports::{CharacterRepo, Dialog, DialogPort, ROLL_BUTTON};

use super::error::SkillCheckError;
use super::roll_skill::{RollSkill, SkillCheckResult};

/// Prompted roll use case.
pub struct PromptSkillRoll {
    characters: Arc<dyn CharacterRepo>,
    dialog: Arc<dyn DialogPort>,
    roll: Arc<RollSkill>,
    system: Arc<Essence20System>,
}

impl PromptSkillRoll {
    pub fn new(
        characters: Arc<dyn CharacterRepo>,
        dialog: Arc<dyn DialogPort>,
        roll: Arc<RollSkill>,
        system: Arc<Essence20System>,
    ) -> Self {
        Self {
            characters,
            dialog,
            roll,
            system,
        }
    }

    /// Ask for roll options, then roll.
    ///
    /// Returns `Ok(None)` when the prompt was dismissed or cancelled.
    pub async fn execute(
        &self,
        character_id: CharacterId,
        skill_id: &str,
    ) -> Result<Option<SkillCheckResult>, SkillCheckError> {
        let character = self
            .characters
            .get(character_id)
            .await?
            .ok_or(SkillCheckError::CharacterNotFound(character_id))?;
        let catalog = self.system.catalog();

        let skill = catalog.require(skill_id)?;
        if skill.no_roll {
            tracing::warn!(
                character_id = %character_id,
                skill = %skill_id,
                "Refusing to prompt for a non-rollable skill"
            );
            return Err(DomainError::not_rollable(skill.id, skill.label).into());
        }

        let specialized_default = character.specialization_default(catalog, skill_id)?;
        let response = self
            .dialog
            .present(Dialog::skill_roll_options(skill.label, specialized_default))
            .await?;

        if !response.is(ROLL_BUTTON) {
            tracing::debug!(
                character_id = %character_id,
                skill = %skill_id,
                "Roll prompt dismissed"
            );
            return Ok(None);
        }

        let request = request_from_fields(&response.fields);
        self.roll
            .execute(character_id, skill_id, request)
            .await
            .map(Some)
    }
}

/// Read the prompt's fields. A missing or unreadable bonus counts as 0.
fn request_from_fields(fields: &FormData) -> SkillCheckRequest {
    let mut request = match fields.text_or("mode", "normal").trim() {
        "edge" => SkillCheckRequest::default().with_edge(),
        "snag" => SkillCheckRequest::default().with_snag(),
        _ => SkillCheckRequest::default(),
    };
    request.bonus = fields
        .get("bonus")
        .and_then(|v| parse_number(&v.as_text()))
        .map(|n| clamp_to(n, -MAX_FLAT_BONUS, MAX_FLAT_BONUS))
        .unwrap_or(0);
    request.with_specialized(fields.checked("specialized"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{
        DialogError, DialogResponse, MockCharacterRepo, MockDialogPort, MockDieRollerPort,
        MockMessageLogPort,
    };
    use pr20_domain::{Character, CharacterKind, CharacterName};

    fn character(system: &Essence20System) -> Character {
        Character::new(
            CharacterName::new("Billy").unwrap(),
            CharacterKind::Character,
            system.catalog(),
        )
    }

    fn prompt(
        character: Character,
        dialog: MockDialogPort,
        dice: MockDieRollerPort,
        log: MockMessageLogPort,
    ) -> PromptSkillRoll {
        let system = Arc::new(Essence20System::default());
        let mut repo = MockCharacterRepo::new();
        repo.expect_get()
            .returning(move |_| Ok(Some(character.clone())));
        let repo: Arc<dyn CharacterRepo> = Arc::new(repo);
        let roll = Arc::new(RollSkill::new(
            repo.clone(),
            Arc::new(dice),
            Arc::new(log),
            system.clone(),
        ));
        PromptSkillRoll::new(repo, Arc::new(dialog), roll, system)
    }

    #[test]
    fn reads_mode_bonus_and_specialization() {
        let fields = FormData::new()
            .with("mode", "edge")
            .with("bonus", "2000")
            .with("specialized", true);
        let request = request_from_fields(&fields);
        assert!(request.edge);
        assert!(!request.snag);
        assert_eq!(request.bonus, 999);
        assert_eq!(request.specialized_override, Some(true));
    }

    #[test]
    fn unreadable_bonus_is_zero() {
        let fields = FormData::new().with("mode", "snag").with("bonus", "lots");
        let request = request_from_fields(&fields);
        assert!(request.snag);
        assert_eq!(request.bonus, 0);
        assert_eq!(request.specialized_override, Some(false));
    }

    #[tokio::test]
    async fn cancelled_prompt_rolls_nothing() {
        let system = Essence20System::default();
        let c = character(&system);
        let id = c.id();

        let mut dialog = MockDialogPort::new();
        dialog
            .expect_present()
            .times(1)
            .returning(|_| Ok(DialogResponse::clicked("cancel")));
        let mut dice = MockDieRollerPort::new();
        dice.expect_evaluate().never();
        let mut log = MockMessageLogPort::new();
        log.expect_post().never();

        let result = prompt(c, dialog, dice, log)
            .execute(id, "science")
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn dialog_failure_rolls_nothing() {
        let system = Essence20System::default();
        let c = character(&system);
        let id = c.id();

        let mut dialog = MockDialogPort::new();
        dialog
            .expect_present()
            .returning(|_| Err(DialogError::Render("no canvas".into())));
        let mut dice = MockDieRollerPort::new();
        dice.expect_evaluate().never();

        let err = prompt(c, dialog, dice, MockMessageLogPort::new())
            .execute(id, "science")
            .await
            .unwrap_err();
        assert!(matches!(err, SkillCheckError::Dialog(_)));
        assert!(!err.is_refusal());
    }

    #[tokio::test]
    async fn dismissed_prompt_rolls_nothing() {
        let system = Essence20System::default();
        let c = character(&system);
        let id = c.id();

        let mut dialog = MockDialogPort::new();
        dialog
            .expect_present()
            .returning(|_| Ok(DialogResponse::dismissed()));
        let mut log = MockMessageLogPort::new();
        log.expect_post().never();

        let result = prompt(c, dialog, MockDieRollerPort::new(), log)
            .execute(id, "science")
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn non_rollable_skill_is_refused_before_prompting() {
        let system = Essence20System::default();
        let c = character(&system);
        let id = c.id();

        let mut dialog = MockDialogPort::new();
        dialog.expect_present().never();

        let err = prompt(c, dialog, MockDieRollerPort::new(), MockMessageLogPort::new())
            .execute(id, "conditioning")
            .await
            .unwrap_err();
        assert!(err.is_refusal());
    }

    #[tokio::test]
    async fn confirmed_prompt_rolls_with_chosen_options() {
        let system = Essence20System::default();
        let mut c = character(&system);
        c.set_skill_rank(system.catalog(), "science", 1).unwrap();
        let id = c.id();

        let mut dialog = MockDialogPort::new();
        dialog
            .expect_present()
            .withf(|d| d.title == "Roll: Science")
            .returning(|_| {
                Ok(DialogResponse::clicked("roll")
                    .with_fields(FormData::new().with("mode", "edge").with("bonus", "2")))
            });
        let mut dice = MockDieRollerPort::new();
        dice.expect_evaluate()
            .returning(|f| Ok(if f.die_size == 20 { 15 } else { 2 }));
        let mut log = MockMessageLogPort::new();
        log.expect_post().times(1).returning(|_, _| Ok(()));

        let result = prompt(c, dialog, dice, log)
            .execute(id, "science")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(result.plan.d20.formula().to_string(), "2d20kh1");
        // 15 + smarts 1 + d2 2 + bonus 2
        assert_eq!(result.outcome.grand_total, 20);
        assert!(result.summary.contains(" + bonus(2) = 20"));
    }
}
