//! Pet and adoption documents.

use chrono::NaiveDate;

use super::{AdoptionId, PetId, UserId};

/// A pet listed for adoption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pet {
    /// Document id.
    pub id: PetId,
    /// Pet name.
    pub name: String,
    /// Species label.
    pub specie: String,
    /// Date of birth.
    pub birth_date: NaiveDate,
    /// Whether the pet has been adopted.
    pub adopted: bool,
    /// Adopting user, once adopted.
    pub owner: Option<UserId>,
    /// Picture URL.
    pub image: Option<String>,
}

impl Pet {
    /// A new, unadopted pet with a fresh id.
    #[must_use]
    pub fn list(name: String, specie: String, birth_date: NaiveDate, image: Option<String>) -> Self {
        Self {
            id: PetId::generate(),
            name,
            specie,
            birth_date,
            adopted: false,
            owner: None,
            image,
        }
    }
}

/// Input for `POST /api/pets`, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPet {
    /// Pet name.
    pub name: Option<String>,
    /// Species label.
    pub specie: Option<String>,
    /// Birth date text.
    pub birth_date: Option<String>,
    /// Picture URL.
    pub image: Option<String>,
}

/// Partial update applied by `PUT /api/pets/{pid}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PetUpdate {
    /// New name.
    pub name: Option<String>,
    /// New species.
    pub specie: Option<String>,
    /// New birth date text.
    pub birth_date: Option<String>,
    /// New picture URL.
    pub image: Option<String>,
}

/// Outcome of atomically claiming a pet for an adopter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PetClaim {
    /// The pet was free and now belongs to the adopter.
    Claimed(Pet),
    /// Someone adopted the pet first.
    AlreadyAdopted,
    /// No pet has that id.
    Missing,
}

/// A completed adoption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adoption {
    /// Document id.
    pub id: AdoptionId,
    /// Adopting user.
    pub owner: UserId,
    /// Adopted pet.
    pub pet: PetId,
}

impl Adoption {
    /// Record `owner` adopting `pet`.
    #[must_use]
    pub fn record(owner: UserId, pet: PetId) -> Self {
        Self {
            id: AdoptionId::generate(),
            owner,
            pet,
        }
    }
}
