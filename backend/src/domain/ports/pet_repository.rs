//! Port for pet document storage.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{Pet, PetClaim, PetId, UserId};

/// Persistence operations on pet documents.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PetRepository: Send + Sync {
    /// Every pet, in insertion order.
    async fn list(&self) -> Result<Vec<Pet>, RepositoryError>;

    /// Fetch a pet by id.
    async fn find_by_id(&self, id: &PetId) -> Result<Option<Pet>, RepositoryError>;

    /// Store a new pet.
    async fn insert(&self, pet: &Pet) -> Result<(), RepositoryError>;

    /// Store several new pets atomically.
    async fn insert_many(&self, pets: &[Pet]) -> Result<(), RepositoryError>;

    /// Replace a stored pet; `false` when no such pet exists.
    async fn update(&self, pet: &Pet) -> Result<bool, RepositoryError>;

    /// Mark an unadopted pet as adopted by `owner` in one atomic step.
    async fn claim(&self, id: &PetId, owner: &UserId) -> Result<PetClaim, RepositoryError>;
    /// Return a pet to the unadopted state; `false` when no such pet exists.
    async fn release(&self, id: &PetId) -> Result<bool, RepositoryError>;
    /// Remove a pet; `false` when no such pet exists.
    async fn delete(&self, id: &PetId) -> Result<bool, RepositoryError>;
}
