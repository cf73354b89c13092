//! Character builder use cases.
//!
//! Building a character is two-phase. [`ReviewDraft`] parses and validates a
//! builder form without saving anything; [`CommitDraft`] writes the draft,
//! refusing when warnings exist and the user has not chosen to proceed.
//! [`SubmitBuilder`] runs both with the confirmation dialog in between.

mod commit;
mod error;
mod review;
mod submit;

pub use commit::{BuilderOutcome, CommitDraft};
pub use error::CharacterBuilderError;
pub use review::{DraftReview, ReviewDraft};
pub use submit::SubmitBuilder;

use std::sync::Arc;

/// Container for character builder use cases.
pub struct CharacterBuilderUseCases {
    pub review: Arc<ReviewDraft>,
    pub commit: Arc<CommitDraft>,
    pub submit: Arc<SubmitBuilder>,
}

impl CharacterBuilderUseCases {
    pub fn new(
        review: Arc<ReviewDraft>,
        commit: Arc<CommitDraft>,
        submit: Arc<SubmitBuilder>,
    ) -> Self {
        Self {
            review,
            commit,
            submit,
        }
    }
}
