//! Pet catalogue service backing `/api/pets`.

use std::sync::Arc;

use serde_json::json;

use crate::domain::ports::PetRepository;
use crate::domain::validation::{RequiredFields, bounded_text, parse_birth_date};
use crate::domain::{Error, ErrorKind, NewPet, Pet, PetId, PetUpdate};

/// `RESOURCE_NOT_FOUND` for a pet id.
pub(crate) fn pet_not_found(id: &PetId) -> Error {
    Error::not_found(json!({ "resource": "pet", "id": id.to_string() }))
}

/// Lists, creates, edits and removes pets.
#[derive(Clone)]
pub struct PetsService {
    pets: Arc<dyn PetRepository>,
}

impl PetsService {
    /// Create the service over a pet repository.
    pub fn new(pets: Arc<dyn PetRepository>) -> Self {
        Self { pets }
    }

    /// Every pet.
    ///
    /// # Errors
    /// Repository failures, mapped to dictionary kinds.
    pub async fn list(&self) -> Result<Vec<Pet>, Error> {
        Ok(self.pets.list().await?)
    }

    /// List a new pet.
    ///
    /// `name`, `specie` and `birthDate` are required; every missing one is
    /// reported in a single `MISSING_REQUIRED_FIELDS` error.
    ///
    /// # Errors
    /// Missing or invalid fields, or a repository failure.
    pub async fn create(&self, input: NewPet) -> Result<Pet, Error> {
        let mut required = RequiredFields::default();
        let name = required.take("name", input.name);
        let specie = required.take("specie", input.specie);
        let birth_date = required.take("birthDate", input.birth_date);
        required.finish()?;

        let pet = Pet::list(
            bounded_text("name", &name)?,
            bounded_text("specie", &specie)?,
            parse_birth_date(&birth_date)?,
            input.image,
        );
        self.pets.insert(&pet).await?;
        Ok(pet)
    }

    /// Apply a partial update.
    ///
    /// # Errors
    /// `VALIDATION_ERROR` for an empty update, field validation errors, or
    /// `RESOURCE_NOT_FOUND`.
    pub async fn update(&self, id: &PetId, update: PetUpdate) -> Result<Pet, Error> {
        if update == PetUpdate::default() {
            return Err(Error::new(ErrorKind::ValidationError)
                .with_detail("no updatable fields supplied"));
        }
        let mut pet = self
            .pets
            .find_by_id(id)
            .await?
            .ok_or_else(|| pet_not_found(id))?;
        if let Some(name) = update.name {
            pet.name = bounded_text("name", &name)?;
        }
        if let Some(specie) = update.specie {
            pet.specie = bounded_text("specie", &specie)?;
        }
        if let Some(birth_date) = update.birth_date {
            pet.birth_date = parse_birth_date(&birth_date)?;
        }
        if let Some(image) = update.image {
            pet.image = Some(image);
        }
        if !self.pets.update(&pet).await? {
            return Err(pet_not_found(id));
        }
        Ok(pet)
    }

    /// Remove a pet.
    ///
    /// # Errors
    /// `RESOURCE_NOT_FOUND` when absent, or a repository failure.
    pub async fn delete(&self, id: &PetId) -> Result<(), Error> {
        if self.pets.delete(id).await? {
            Ok(())
        } else {
            Err(pet_not_found(id))
        }
    }
}
