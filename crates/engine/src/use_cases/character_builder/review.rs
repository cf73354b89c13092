//! Review draft use case.

use std::sync::Arc;

use pr20_domain::{parse_builder_form, CharacterDraft, CreationWarning, Essence20System, FormData};

/// A parsed builder submission and what is wrong with it.
#[derive(Debug, Clone)]
pub struct DraftReview {
    pub draft: CharacterDraft,
    pub warnings: Vec<CreationWarning>,
}

impl DraftReview {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Parse a builder form and validate it. Nothing is saved.
pub struct ReviewDraft {
    system: Arc<Essence20System>,
}

impl ReviewDraft {
    pub fn new(system: Arc<Essence20System>) -> Self {
        Self { system }
    }

    pub fn execute(&self, form: &FormData) -> DraftReview {
        let draft = parse_builder_form(self.system.catalog(), form);
        let warnings = self.system.validate(&draft);
        DraftReview { draft, warnings }
    }
}
