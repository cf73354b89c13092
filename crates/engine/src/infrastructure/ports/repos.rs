//! Repository port traits for the document store.

use async_trait::async_trait;
use pr20_domain::{Character, CharacterId};

use super::error::RepoError;

// =============================================================================
// Character Storage
// =============================================================================

/// Character documents keyed by id.
///
/// `update` replaces the stored document; callers load, mutate the aggregate
/// and write it back, so the merge happens in the domain.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterRepo: Send + Sync {
    async fn get(&self, id: CharacterId) -> Result<Option<Character>, RepoError>;
    async fn create(&self, character: &Character) -> Result<(), RepoError>;
    async fn update(&self, character: &Character) -> Result<(), RepoError>;
    async fn list(&self) -> Result<Vec<Character>, RepoError>;
}
