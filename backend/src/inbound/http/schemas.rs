//! Wire representations of domain documents.
//!
//! Domain types stay free of serde and utoipa. These views mirror them for
//! responses and carry the OpenAPI schema; password hashes never appear.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Adoption, GeneratedCounts, Pet, User};

/// A user as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserView {
    /// Document id.
    #[serde(rename = "_id")]
    #[schema(example = "60d0fe4f5311236168a109ca")]
    pub id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address.
    #[schema(example = "ana@example.com")]
    pub email: String,
    /// `user` or `admin`.
    #[schema(example = "user")]
    pub role: String,
    /// Ids of adopted pets.
    pub pets: Vec<String>,
    /// Last login or logout.
    pub last_connection: Option<DateTime<Utc>>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.to_string(),
            role: user.role.to_string(),
            pets: user.pets.iter().map(ToString::to_string).collect(),
            last_connection: user.last_connection,
        }
    }
}

/// A pet as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PetView {
    /// Document id.
    #[serde(rename = "_id")]
    #[schema(example = "60d0fe4f5311236168a109ca")]
    pub id: String,
    /// Pet name.
    #[schema(example = "Puchini")]
    pub name: String,
    /// Species label.
    #[schema(example = "dog")]
    pub specie: String,
    /// Date of birth.
    pub birth_date: NaiveDate,
    /// Whether the pet has been adopted.
    pub adopted: bool,
    /// Adopting user id.
    pub owner: Option<String>,
    /// Picture URL.
    pub image: Option<String>,
}

impl From<&Pet> for PetView {
    fn from(pet: &Pet) -> Self {
        Self {
            id: pet.id.to_string(),
            name: pet.name.clone(),
            specie: pet.specie.clone(),
            birth_date: pet.birth_date,
            adopted: pet.adopted,
            owner: pet.owner.map(|owner| owner.to_string()),
            image: pet.image.clone(),
        }
    }
}

/// An adoption as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AdoptionView {
    /// Document id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Adopting user id.
    pub owner: String,
    /// Adopted pet id.
    pub pet: String,
}

impl From<&Adoption> for AdoptionView {
    fn from(adoption: &Adoption) -> Self {
        Self {
            id: adoption.id.to_string(),
            owner: adoption.owner.to_string(),
            pet: adoption.pet.to_string(),
        }
    }
}

/// The logged-in user, as returned by `GET /api/sessions/current`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CurrentUserView {
    /// Full name.
    #[schema(example = "Ana Lopez")]
    pub name: String,
    /// Email address.
    pub email: String,
    /// `user` or `admin`.
    pub role: String,
}

impl From<&User> for CurrentUserView {
    fn from(user: &User) -> Self {
        Self {
            name: user.full_name(),
            email: user.email.to_string(),
            role: user.role.to_string(),
        }
    }
}

/// Counts reported by `POST /api/mocks/generateData`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GeneratedCountsView {
    /// Users inserted.
    pub users: usize,
    /// Pets inserted.
    pub pets: usize,
}

impl From<GeneratedCounts> for GeneratedCountsView {
    fn from(counts: GeneratedCounts) -> Self {
        Self {
            users: counts.users,
            pets: counts.pets,
        }
    }
}

/// Map a slice of documents to their views.
pub(crate) fn views<'a, D, V>(documents: &'a [D]) -> Vec<V>
where
    V: From<&'a D>,
{
    documents.iter().map(V::from).collect()
}
