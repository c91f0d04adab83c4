//! In-process [`AdoptionRepository`]; a pet can be adopted once.

use async_trait::async_trait;

use super::collection::Collection;
use crate::domain::ports::{AdoptionRepository, RepositoryError};
use crate::domain::{Adoption, AdoptionId};

/// Adoption documents kept in memory.
#[derive(Debug, Default)]
pub struct MemoryAdoptionRepository {
    adoptions: Collection<Adoption>,
}

fn pet_key(adoption: &Adoption) -> Option<String> {
    Some(format!("pet:{}", adoption.pet))
}

#[async_trait]
impl AdoptionRepository for MemoryAdoptionRepository {
    async fn list(&self) -> Result<Vec<Adoption>, RepositoryError> {
        Ok(self.adoptions.all().await)
    }

    async fn find_by_id(&self, id: &AdoptionId) -> Result<Option<Adoption>, RepositoryError> {
        Ok(self.adoptions.get(*id).await)
    }

    async fn insert(&self, adoption: &Adoption) -> Result<(), RepositoryError> {
        self.adoptions
            .insert_all(std::slice::from_ref(adoption), pet_key)
            .await
    }
}
