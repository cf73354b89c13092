//! Submit builder use case.
//!
//! The full builder flow: parse and validate the form, ask "Proceed with
//! warnings?" only when something is off, then commit.

use std::sync::Arc;

use pr20_domain::{CharacterId, FormData};

use crate::infrastructure::ports::{Dialog, DialogPort, PROCEED_BUTTON};

use super::commit::{BuilderOutcome, CommitDraft};
use super::error::CharacterBuilderError;
use super::review::ReviewDraft;

pub struct SubmitBuilder {
    review: Arc<ReviewDraft>,
    commit: Arc<CommitDraft>,
    dialog: Arc<dyn DialogPort>,
}

impl SubmitBuilder {
    pub fn new(
        review: Arc<ReviewDraft>,
        commit: Arc<CommitDraft>,
        dialog: Arc<dyn DialogPort>,
    ) -> Self {
        Self {
            review,
            commit,
            dialog,
        }
    }

    /// Closing the confirmation dialog counts as "Go Back".
    pub async fn execute(
        &self,
        form: &FormData,
        target: Option<CharacterId>,
    ) -> Result<BuilderOutcome, CharacterBuilderError> {
        let review = self.review.execute(form);

        let proceed = if review.is_clean() {
            true
        } else {
            let response = self
                .dialog
                .present(Dialog::confirm_warnings(&review.warnings))
                .await?;
            response.is(PROCEED_BUTTON)
        };

        self.commit.execute(&review.draft, target, proceed).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{DialogResponse, MockCharacterRepo, MockDialogPort};
    use pr20_domain::Essence20System;

    fn submit(repo: MockCharacterRepo, dialog: MockDialogPort) -> SubmitBuilder {
        let system = Arc::new(Essence20System::default());
        SubmitBuilder::new(
            Arc::new(ReviewDraft::new(system.clone())),
            Arc::new(CommitDraft::new(Arc::new(repo), system)),
            Arc::new(dialog),
        )
    }

    fn clean_form() -> FormData {
        FormData::new()
            .with("name", "Zack")
            .with("essence.strength", "3")
            .with("essence.speed", "3")
            .with("essence.smarts", "3")
            .with("essence.social", "3")
    }

    #[tokio::test]
    async fn clean_form_skips_confirmation() {
        let mut dialog = MockDialogPort::new();
        dialog.expect_present().never();
        let mut repo = MockCharacterRepo::new();
        repo.expect_create().times(1).returning(|_| Ok(()));

        let outcome = submit(repo, dialog)
            .execute(&clean_form(), None)
            .await
            .unwrap();
        assert_eq!(outcome.character().unwrap().name().as_str(), "Zack");
    }

    #[tokio::test]
    async fn go_back_keeps_builder_open() {
        let mut dialog = MockDialogPort::new();
        dialog
            .expect_present()
            .withf(|d| d.title == "Proceed with warnings?")
            .times(1)
            .returning(|_| Ok(DialogResponse::clicked("no")));
        let mut repo = MockCharacterRepo::new();
        repo.expect_create().never();

        let outcome = submit(repo, dialog)
            .execute(&FormData::new(), None)
            .await
            .unwrap();
        assert!(matches!(outcome, BuilderOutcome::Unconfirmed { .. }));
    }

    #[tokio::test]
    async fn closing_the_dialog_is_go_back() {
        let mut dialog = MockDialogPort::new();
        dialog
            .expect_present()
            .returning(|_| Ok(DialogResponse::dismissed()));
        let mut repo = MockCharacterRepo::new();
        repo.expect_create().never();

        let outcome = submit(repo, dialog)
            .execute(&FormData::new(), None)
            .await
            .unwrap();
        assert_eq!(outcome.warnings().len(), 1);
        assert!(outcome.character().is_none());
    }

    #[tokio::test]
    async fn proceed_commits_despite_warnings() {
        let mut dialog = MockDialogPort::new();
        dialog
            .expect_present()
            .returning(|_| Ok(DialogResponse::clicked("yes")));
        let mut repo = MockCharacterRepo::new();
        repo.expect_create()
            .withf(|c| c.name().as_str() == "New Ranger")
            .times(1)
            .returning(|_| Ok(()));

        let outcome = submit(repo, dialog)
            .execute(&FormData::new().with("name", "   "), None)
            .await
            .unwrap();
        assert_eq!(outcome.warnings().len(), 1);
        assert!(outcome.character().is_some());
    }
}
