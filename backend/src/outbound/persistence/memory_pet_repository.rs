//! In-process [`PetRepository`].

use async_trait::async_trait;

use super::collection::{Collection, no_unique_key};
use crate::domain::ports::{PetRepository, RepositoryError};
use crate::domain::{Pet, PetClaim, PetId, UserId};

/// Pet documents kept in memory.
#[derive(Debug, Default)]
pub struct MemoryPetRepository {
    pets: Collection<Pet>,
}

#[async_trait]
impl PetRepository for MemoryPetRepository {
    async fn list(&self) -> Result<Vec<Pet>, RepositoryError> {
        Ok(self.pets.all().await)
    }

    async fn find_by_id(&self, id: &PetId) -> Result<Option<Pet>, RepositoryError> {
        Ok(self.pets.get(*id).await)
    }

    async fn insert(&self, pet: &Pet) -> Result<(), RepositoryError> {
        self.pets
            .insert_all(std::slice::from_ref(pet), no_unique_key)
            .await
    }

    async fn insert_many(&self, pets: &[Pet]) -> Result<(), RepositoryError> {
        self.pets.insert_all(pets, no_unique_key).await
    }

    async fn update(&self, pet: &Pet) -> Result<bool, RepositoryError> {
        self.pets.replace(pet, no_unique_key).await
    }

    async fn claim(&self, id: &PetId, owner: &UserId) -> Result<PetClaim, RepositoryError> {
        let outcome = self
            .pets
            .modify(*id, |pet| {
                if pet.adopted {
                    return PetClaim::AlreadyAdopted;
                }
                pet.adopted = true;
                pet.owner = Some(*owner);
                PetClaim::Claimed(pet.clone())
            })
            .await;
        Ok(outcome.unwrap_or(PetClaim::Missing))
    }

    async fn release(&self, id: &PetId) -> Result<bool, RepositoryError> {
        let released = self
            .pets
            .modify(*id, |pet| {
                pet.adopted = false;
                pet.owner = None;
            })
            .await;
        Ok(released.is_some())
    }

    async fn delete(&self, id: &PetId) -> Result<bool, RepositoryError> {
        Ok(self.pets.remove(*id).await)
    }
}
