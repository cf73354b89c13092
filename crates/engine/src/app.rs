//! Application state and composition.

use std::sync::Arc;

use pr20_domain::Essence20System;

use crate::infrastructure::{
    ports::{CharacterRepo, DialogPort, DieRollerPort, MessageLogPort},
    settings::RulesSettings,
};
use crate::use_cases;

/// Main application state.
///
/// Holds the rules system, the repositories and all use cases. The rules
/// system is built once from settings and shared by every use case.
pub struct App {
    pub system: Arc<Essence20System>,
    pub repositories: Repositories,
    pub use_cases: UseCases,
}

/// Container for all repositories.
pub struct Repositories {
    pub character: Arc<dyn CharacterRepo>,
}

/// Container for all use cases.
pub struct UseCases {
    pub skill_check: use_cases::SkillCheckUseCases,
    pub character_builder: use_cases::CharacterBuilderUseCases,
    pub character_sheet: use_cases::CharacterSheetUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(
        settings: &RulesSettings,
        character_repo: Arc<dyn CharacterRepo>,
        dice: Arc<dyn DieRollerPort>,
        log: Arc<dyn MessageLogPort>,
        dialog: Arc<dyn DialogPort>,
    ) -> Self {
        let system = Arc::new(settings.system());
        tracing::info!(
            system = system.system_id(),
            name = system.display_name(),
            creation_essence_points = system.creation_rules().essence_points,
            "Rules system configured"
        );

        let roll = Arc::new(use_cases::skill_check::RollSkill::new(
            character_repo.clone(),
            dice,
            log,
            system.clone(),
        ));
        let prompt = Arc::new(use_cases::skill_check::PromptSkillRoll::new(
            character_repo.clone(),
            dialog.clone(),
            roll.clone(),
            system.clone(),
        ));
        let skill_check = use_cases::SkillCheckUseCases::new(roll, prompt);

        let review = Arc::new(use_cases::character_builder::ReviewDraft::new(
            system.clone(),
        ));
        let commit = Arc::new(use_cases::character_builder::CommitDraft::new(
            character_repo.clone(),
            system.clone(),
        ));
        let submit = Arc::new(use_cases::character_builder::SubmitBuilder::new(
            review.clone(),
            commit.clone(),
            dialog,
        ));
        let character_builder = use_cases::CharacterBuilderUseCases::new(review, commit, submit);

        let character_sheet =
            use_cases::CharacterSheetUseCases::new(character_repo.clone(), system.clone());

        Self {
            system,
            repositories: Repositories {
                character: character_repo,
            },
            use_cases: UseCases {
                skill_check,
                character_builder,
                character_sheet,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::dice::RandomDieRoller;
    use crate::infrastructure::memory::{InMemoryCharacterRepo, InMemoryMessageLog, ScriptedDialog};
    use crate::infrastructure::ports::DialogResponse;
    use crate::infrastructure::random::FixedRandom;
    use pr20_domain::FormData;

    struct Harness {
        app: App,
        log: Arc<InMemoryMessageLog>,
        dialog: Arc<ScriptedDialog>,
    }

    fn harness(settings: RulesSettings, roll: i32) -> Harness {
        let log = Arc::new(InMemoryMessageLog::new());
        let dialog = Arc::new(ScriptedDialog::default());
        let app = App::new(
            &settings,
            Arc::new(InMemoryCharacterRepo::new()),
            Arc::new(RandomDieRoller::new(Arc::new(FixedRandom(roll)))),
            log.clone(),
            dialog.clone(),
        );
        Harness { app, log, dialog }
    }

    fn ranger_form() -> FormData {
        FormData::new()
            .with("name", "Adam")
            .with("essence.strength", "3")
            .with("essence.speed", "4")
            .with("essence.smarts", "3")
            .with("essence.social", "2")
            .with("skill.finesse.rank", "3")
            .with("skill.finesse.specialized", true)
            .with("skill.finesse.specialization", "Sleight of Hand")
    }

    #[tokio::test]
    async fn build_then_roll_from_sheet() {
        let h = harness(RulesSettings::default(), 2);

        let outcome = h
            .app
            .use_cases
            .character_builder
            .submit
            .execute(&ranger_form(), None)
            .await
            .unwrap();
        let id = outcome.character().unwrap().id();
        assert!(h.dialog.presented().await.is_empty());

        h.dialog
            .push(DialogResponse::clicked("roll").with_fields(
                FormData::new().with("mode", "normal").with("specialized", true),
            ))
            .await;
        let result = h
            .app
            .use_cases
            .skill_check
            .prompt
            .execute(id, "finesse")
            .await
            .unwrap()
            .unwrap();

        // d20 2 + speed 4 + best of 1d2,1d4,1d6 (all 2)
        assert_eq!(result.outcome.grand_total, 8);
        let entries = h.log.entries().await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].speaker, "Adam");
        assert_eq!(
            entries[0].content,
            "Adam: Finesse - Sleight of Hand\n\
             d20=2 + speed(4) + skill(2) = 8\n\
             Skill dice: 1d2=2, 1d4=2, 1d6=2"
        );
    }

    #[tokio::test]
    async fn configured_essence_points_drive_warnings() {
        let settings = RulesSettings {
            creation_essence_points: 4,
        };
        let h = harness(settings, 1);

        let review = h
            .app
            .use_cases
            .character_builder
            .review
            .execute(&FormData::new());
        assert!(review.is_clean());
    }

    #[tokio::test]
    async fn refused_roll_leaves_log_empty() {
        let h = harness(RulesSettings::default(), 10);
        h.dialog.push(DialogResponse::clicked("yes")).await;
        let outcome = h
            .app
            .use_cases
            .character_builder
            .submit
            .execute(&FormData::new(), None)
            .await
            .unwrap();
        let id = outcome.character().unwrap().id();

        let err = h
            .app
            .use_cases
            .skill_check
            .prompt
            .execute(id, "conditioning")
            .await
            .unwrap_err();
        assert!(err.is_refusal());
        assert!(h.log.entries().await.is_empty());
        // only the warnings dialog was shown
        assert_eq!(h.dialog.presented().await.len(), 1);
    }
}
