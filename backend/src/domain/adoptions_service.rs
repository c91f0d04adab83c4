//! Adoption workflow backing `/api/adoptions`.

use std::sync::Arc;

use serde_json::json;

use crate::domain::pets_service::pet_not_found;
use crate::domain::ports::{AdoptionRepository, PetRepository, RepositoryError, UserRepository};
use crate::domain::users_service::user_not_found;
use crate::domain::{Adoption, AdoptionId, Error, ErrorKind, PetClaim, PetId, UserId};

/// Links users to the pets they adopt.
#[derive(Clone)]
pub struct AdoptionsService {
    users: Arc<dyn UserRepository>,
    pets: Arc<dyn PetRepository>,
    adoptions: Arc<dyn AdoptionRepository>,
}

impl AdoptionsService {
    /// Create the service over the three repositories it coordinates.
    pub fn new(
        users: Arc<dyn UserRepository>,
        pets: Arc<dyn PetRepository>,
        adoptions: Arc<dyn AdoptionRepository>,
    ) -> Self {
        Self {
            users,
            pets,
            adoptions,
        }
    }

    /// Every adoption.
    ///
    /// # Errors
    /// Repository failures, mapped to dictionary kinds.
    pub async fn list(&self) -> Result<Vec<Adoption>, Error> {
        Ok(self.adoptions.list().await?)
    }

    /// One adoption by id.
    ///
    /// # Errors
    /// `RESOURCE_NOT_FOUND` when absent.
    pub async fn get(&self, id: &AdoptionId) -> Result<Adoption, Error> {
        self.adoptions.find_by_id(id).await?.ok_or_else(|| {
            Error::not_found(json!({ "resource": "adoption", "id": id.to_string() }))
        })
    }

    /// Record `user_id` adopting `pet_id`.
    ///
    /// The pet is claimed first, atomically, so concurrent adopters of the
    /// same pet see exactly one winner. The winner's pet list then gains
    /// the pet and an adoption document is stored; if either step fails,
    /// the steps already taken are undone.
    ///
    /// # Errors
    /// `RESOURCE_NOT_FOUND` for an unknown user or pet, `INCONSISTENT_STATE`
    /// when the pet is already adopted.
    pub async fn adopt(&self, user_id: &UserId, pet_id: &PetId) -> Result<Adoption, Error> {
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(user_not_found(user_id));
        }
        match self.pets.claim(pet_id, user_id).await? {
            PetClaim::Claimed(_) => {}
            PetClaim::AlreadyAdopted => return Err(already_adopted(pet_id)),
            PetClaim::Missing => return Err(pet_not_found(pet_id)),
        }

        let adoption = Adoption::record(*user_id, *pet_id);
        if let Err(error) = self.link(&adoption).await {
            self.release(pet_id).await;
            return Err(error);
        }
        tracing::info!(
            adoption = %adoption.id,
            user = %user_id,
            pet = %pet_id,
            "pet adopted"
        );
        Ok(adoption)
    }

    async fn link(&self, adoption: &Adoption) -> Result<(), Error> {
        if !self.users.add_pet(&adoption.owner, &adoption.pet).await? {
            return Err(user_not_found(&adoption.owner));
        }
        if let Err(error) = self.adoptions.insert(adoption).await {
            if let Err(undo) = self.users.remove_pet(&adoption.owner, &adoption.pet).await {
                tracing::error!(
                    %undo,
                    user = %adoption.owner,
                    pet = %adoption.pet,
                    "failed to unlink pet from user"
                );
            }
            return Err(match error {
                RepositoryError::Duplicate { .. } => already_adopted(&adoption.pet),
                other => other.into(),
            });
        }
        Ok(())
    }

    async fn release(&self, pet_id: &PetId) {
        if let Err(undo) = self.pets.release(pet_id).await {
            tracing::error!(%undo, pet = %pet_id, "failed to release claimed pet");
        }
    }
}

fn already_adopted(pet_id: &PetId) -> Error {
    Error::new(ErrorKind::InconsistentState).with_detail(json!({
        "pet": pet_id.to_string(),
        "reason": "pet is already adopted",
    }))
}
