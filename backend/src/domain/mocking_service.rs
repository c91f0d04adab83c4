//! Fake data generation backing `/api/mocks`.

use std::sync::Arc;

use chrono::Utc;
use mock_data::{GenerationError, MockGenerator, MockPetSeed, MockRole, MockUserSeed};
use serde_json::json;

use crate::domain::password::PasswordHash;
use crate::domain::ports::{PetRepository, UserRepository};
use crate::domain::validation::EmailAddress;
use crate::domain::{Error, ErrorKind, Pet, Role, User};

/// Password given to every mock user.
pub const MOCK_PASSWORD: &str = "coder123";

/// Pets produced by `GET /api/mocks/mockingpets`.
pub const MOCK_PET_COUNT: usize = 100;

/// Users produced by `GET /api/mocks/mockingusers`.
pub const MOCK_USER_COUNT: usize = 50;

/// Counts of documents written by [`MockingService::generate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratedCounts {
    /// Users inserted.
    pub users: usize,
    /// Pets inserted.
    pub pets: usize,
}

/// Turns generated seeds into domain documents.
#[derive(Clone)]
pub struct MockingService {
    users: Arc<dyn UserRepository>,
    pets: Arc<dyn PetRepository>,
    seed: Option<u64>,
}

impl MockingService {
    /// Create the service with an OS-seeded generator.
    pub fn new(users: Arc<dyn UserRepository>, pets: Arc<dyn PetRepository>) -> Self {
        Self {
            users,
            pets,
            seed: None,
        }
    }

    /// Use a fixed seed so output is reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn generator(&self) -> MockGenerator {
        let now = Utc::now();
        match self.seed {
            Some(seed) => MockGenerator::from_seed(seed, now),
            None => MockGenerator::from_os_rng(now),
        }
    }

    /// Generate and persist [`MOCK_PET_COUNT`] pets.
    ///
    /// # Errors
    /// Repository failures.
    pub async fn mock_pets(&self) -> Result<Vec<Pet>, Error> {
        let pets = Self::build_pets(&mut self.generator(), MOCK_PET_COUNT)?;
        self.pets.insert_many(&pets).await?;
        Ok(pets)
    }

    /// Generate [`MOCK_USER_COUNT`] users without persisting them.
    ///
    /// # Errors
    /// Generation failures.
    pub fn mock_users(&self) -> Result<Vec<User>, Error> {
        Self::build_users(&mut self.generator(), MOCK_USER_COUNT)
    }

    /// Generate and persist the requested numbers of users and pets.
    ///
    /// Both batches are built before anything is written. When the pets
    /// cannot be stored, the users inserted for this call are removed again.
    ///
    /// # Errors
    /// `VALIDATION_ERROR` for oversized batches, or repository failures.
    pub async fn generate(&self, users: usize, pets: usize) -> Result<GeneratedCounts, Error> {
        let mut generator = self.generator();
        let users = Self::build_users(&mut generator, users)?;
        let pets = Self::build_pets(&mut generator, pets)?;
        self.users.insert_many(&users).await?;
        if let Err(error) = self.pets.insert_many(&pets).await {
            self.remove_users(&users).await;
            return Err(error.into());
        }
        tracing::info!(users = users.len(), pets = pets.len(), "mock data generated");
        Ok(GeneratedCounts {
            users: users.len(),
            pets: pets.len(),
        })
    }

    async fn remove_users(&self, users: &[User]) {
        for user in users {
            if let Err(undo) = self.users.delete(&user.id).await {
                tracing::error!(%undo, user = %user.id, "failed to remove generated user");
            }
        }
    }

    fn build_users(generator: &mut MockGenerator, count: usize) -> Result<Vec<User>, Error> {
        let seeds = generator.users(count).map_err(generation_error)?;
        let password = PasswordHash::create(MOCK_PASSWORD);
        seeds
            .into_iter()
            .map(|seed| user_from_seed(seed, password.clone()))
            .collect()
    }

    fn build_pets(generator: &mut MockGenerator, count: usize) -> Result<Vec<Pet>, Error> {
        let seeds = generator.pets(count).map_err(generation_error)?;
        Ok(seeds.into_iter().map(pet_from_seed).collect())
    }
}

fn user_from_seed(seed: MockUserSeed, password: PasswordHash) -> Result<User, Error> {
    let email = EmailAddress::parse(&seed.email)?;
    let role = match seed.role {
        MockRole::User => Role::User,
        MockRole::Admin => Role::Admin,
    };
    let mut user = User::register(seed.first_name, seed.last_name, email, password, role);
    user.last_connection = Some(seed.last_connection);
    Ok(user)
}

fn pet_from_seed(seed: MockPetSeed) -> Pet {
    Pet::list(seed.name, seed.specie, seed.birth_date, Some(seed.image))
}

fn generation_error(error: GenerationError) -> Error {
    match error {
        GenerationError::BatchTooLarge { requested, max } => Error::new(ErrorKind::ValidationError)
            .with_detail(json!({ "requested": requested, "max": max })),
        GenerationError::EmailExhausted { .. } => Error::internal(error.to_string()),
    }
}
