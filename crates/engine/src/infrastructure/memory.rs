//! In-memory adapters for running without a host.
//!
//! Used by the binary and by end-to-end tests of the use cases.

use std::collections::VecDeque;

use async_trait::async_trait;
use dashmap::DashMap;
use pr20_domain::{Character, CharacterId};
use tokio::sync::{Mutex, RwLock};

use crate::infrastructure::ports::{
    CharacterRepo, Dialog, DialogError, DialogPort, DialogResponse, LogEntry, LogError,
    MessageLogPort, RepoError,
};

// =============================================================================
// Document store
// =============================================================================

/// Character documents held in a concurrent map.
#[derive(Default)]
pub struct InMemoryCharacterRepo {
    characters: DashMap<CharacterId, Character>,
}

impl InMemoryCharacterRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}

#[async_trait]
impl CharacterRepo for InMemoryCharacterRepo {
    async fn get(&self, id: CharacterId) -> Result<Option<Character>, RepoError> {
        Ok(self.characters.get(&id).map(|c| c.value().clone()))
    }

    async fn create(&self, character: &Character) -> Result<(), RepoError> {
        if self.characters.contains_key(&character.id()) {
            return Err(RepoError::constraint(format!(
                "Character already exists: {}",
                character.id()
            )));
        }
        self.characters.insert(character.id(), character.clone());
        Ok(())
    }

    async fn update(&self, character: &Character) -> Result<(), RepoError> {
        match self.characters.get_mut(&character.id()) {
            Some(mut stored) => {
                *stored = character.clone();
                Ok(())
            }
            None => Err(RepoError::not_found("Character", character.id())),
        }
    }

    async fn list(&self) -> Result<Vec<Character>, RepoError> {
        let mut all: Vec<Character> = self.characters.iter().map(|c| c.value().clone()).collect();
        all.sort_by(|a, b| a.name().as_str().cmp(b.name().as_str()));
        Ok(all)
    }
}

// =============================================================================
// Message log
// =============================================================================

/// Append-only message feed.
#[derive(Default)]
pub struct InMemoryMessageLog {
    entries: RwLock<Vec<LogEntry>>,
}

impl InMemoryMessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn entries(&self) -> Vec<LogEntry> {
        self.entries.read().await.clone()
    }
}

#[async_trait]
impl MessageLogPort for InMemoryMessageLog {
    async fn post(&self, speaker: &str, content: &str) -> Result<(), LogError> {
        self.entries.write().await.push(LogEntry {
            speaker: speaker.to_string(),
            content: content.to_string(),
        });
        Ok(())
    }
}

// =============================================================================
// Dialogs
// =============================================================================

/// Answers dialogs from a queue of canned responses.
///
/// Once the queue runs dry every dialog is treated as dismissed.
#[derive(Default)]
pub struct ScriptedDialog {
    responses: Mutex<VecDeque<DialogResponse>>,
    presented: Mutex<Vec<Dialog>>,
}

impl ScriptedDialog {
    pub fn new(responses: impl IntoIterator<Item = DialogResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            presented: Mutex::new(Vec::new()),
        }
    }

    pub async fn push(&self, response: DialogResponse) {
        self.responses.lock().await.push_back(response);
    }

    /// Dialogs shown so far, oldest first.
    pub async fn presented(&self) -> Vec<Dialog> {
        self.presented.lock().await.clone()
    }
}

#[async_trait]
impl DialogPort for ScriptedDialog {
    async fn present(&self, dialog: Dialog) -> Result<DialogResponse, DialogError> {
        tracing::debug!(title = %dialog.title, "Presenting scripted dialog");
        self.presented.lock().await.push(dialog);
        Ok(self
            .responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(DialogResponse::dismissed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pr20_domain::{CharacterKind, CharacterName, SkillCatalog};

    fn character(name: &str) -> Character {
        Character::new(
            CharacterName::new(name).unwrap(),
            CharacterKind::Character,
            &SkillCatalog::standard(),
        )
    }

    #[tokio::test]
    async fn create_then_get() {
        let repo = InMemoryCharacterRepo::new();
        let c = character("Tommy");
        repo.create(&c).await.unwrap();

        let loaded = repo.get(c.id()).await.unwrap();
        assert_eq!(loaded, Some(c.clone()));
        assert!(matches!(
            repo.create(&c).await,
            Err(RepoError::ConstraintViolation(_))
        ));
    }

    #[tokio::test]
    async fn update_requires_existing_document() {
        let repo = InMemoryCharacterRepo::new();
        let c = character("Kimberly");
        let err = repo.update(&c).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn list_is_sorted_by_name() {
        let repo = InMemoryCharacterRepo::new();
        repo.create(&character("Zack")).await.unwrap();
        repo.create(&character("Billy")).await.unwrap();

        let names: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(names, vec!["Billy", "Zack"]);
    }

    #[tokio::test]
    async fn log_keeps_order() {
        let log = InMemoryMessageLog::new();
        log.post("Trini", "first").await.unwrap();
        log.post("Trini", "second").await.unwrap();
        let entries = log.entries().await;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].content, "second");
    }

    #[tokio::test]
    async fn scripted_dialog_dismisses_when_empty() {
        let dialog = ScriptedDialog::new([DialogResponse::clicked("yes")]);
        let first = dialog
            .present(Dialog::confirm_warnings(&[]))
            .await
            .unwrap();
        let second = dialog
            .present(Dialog::confirm_warnings(&[]))
            .await
            .unwrap();

        assert!(first.is("yes"));
        assert_eq!(second.button, None);
        assert_eq!(dialog.presented().await.len(), 2);
    }
}
