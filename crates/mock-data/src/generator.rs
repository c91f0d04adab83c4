//! Seeded generation of fake users and pets.
//!
//! A [`MockGenerator`] owns a `ChaCha8Rng` and a reference instant. Seeding
//! it with the same value and instant always yields the same records, which
//! keeps tests stable while request handlers use an OS-seeded generator.

use std::collections::HashSet;

use chrono::{DateTime, TimeDelta, Utc};
use fake::Fake;
use fake::faker::internet::raw::FreeEmailProvider;
use fake::faker::name::raw::{FirstName, LastName};
use fake::locales::EN;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::GenerationError;
use crate::seed::{MockPetSeed, MockRole, MockUserSeed};

/// Largest number of records a single call may generate.
pub const MAX_BATCH_SIZE: usize = 10_000;

/// Attempts made to find an unused email before giving up.
const MAX_EMAIL_ATTEMPTS: usize = 16;

/// Upper bound of the numeric suffix used to disambiguate emails.
const EMAIL_SUFFIX_MAX: u32 = 10_000;

/// Users were last seen within this many minutes of the reference instant.
const RECENT_CONNECTION_MINUTES: i64 = 24 * 60;

/// Youngest generated pet, in days.
const MIN_PET_AGE_DAYS: i64 = 30;

/// Oldest generated pet, in days.
const MAX_PET_AGE_DAYS: i64 = 15 * 365;

/// Species the generator draws from.
pub const SPECIES: &[&str] = &[
    "dog", "cat", "rabbit", "hamster", "parrot", "turtle", "ferret", "guinea pig",
];

/// Reproducible source of mock users and pets.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use mock_data::MockGenerator;
///
/// let reference = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).single().expect("valid instant");
/// let mut first = MockGenerator::from_seed(7, reference);
/// let mut second = MockGenerator::from_seed(7, reference);
///
/// assert_eq!(first.pets(3).expect("pets"), second.pets(3).expect("pets"));
/// ```
#[derive(Debug, Clone)]
pub struct MockGenerator {
    rng: ChaCha8Rng,
    reference: DateTime<Utc>,
}

impl MockGenerator {
    /// Create a deterministic generator.
    #[must_use]
    pub fn from_seed(seed: u64, reference: DateTime<Utc>) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            reference,
        }
    }

    /// Create a generator seeded from the operating system.
    #[must_use]
    pub fn from_os_rng(reference: DateTime<Utc>) -> Self {
        Self {
            rng: ChaCha8Rng::from_os_rng(),
            reference,
        }
    }

    /// Generate `count` users with unique emails.
    ///
    /// Roles are split evenly between [`MockRole::User`] and
    /// [`MockRole::Admin`]; the last connection falls within the day before
    /// the reference instant.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::BatchTooLarge`] when `count` exceeds
    /// [`MAX_BATCH_SIZE`], or [`GenerationError::EmailExhausted`] when no
    /// unused address can be found.
    pub fn users(&mut self, count: usize) -> Result<Vec<MockUserSeed>, GenerationError> {
        ensure_batch(count)?;
        let mut seen = HashSet::with_capacity(count);
        let mut users = Vec::with_capacity(count);
        for _ in 0..count {
            let first_name: String = FirstName(EN).fake_with_rng(&mut self.rng);
            let last_name: String = LastName(EN).fake_with_rng(&mut self.rng);
            let email = self.unique_email(&first_name, &last_name, &mut seen)?;
            let role = if self.rng.random_bool(0.5) {
                MockRole::Admin
            } else {
                MockRole::User
            };
            let minutes_ago = self.rng.random_range(0..RECENT_CONNECTION_MINUTES);
            users.push(MockUserSeed {
                first_name,
                last_name,
                email,
                role,
                last_connection: self.reference - TimeDelta::minutes(minutes_ago),
            });
        }
        Ok(users)
    }

    /// Generate `count` pets, none of them adopted.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::BatchTooLarge`] when `count` exceeds
    /// [`MAX_BATCH_SIZE`].
    pub fn pets(&mut self, count: usize) -> Result<Vec<MockPetSeed>, GenerationError> {
        ensure_batch(count)?;
        let today = self.reference.date_naive();
        let mut pets = Vec::with_capacity(count);
        for _ in 0..count {
            let name: String = FirstName(EN).fake_with_rng(&mut self.rng);
            let specie = SPECIES.choose(&mut self.rng).copied().unwrap_or("dog");
            let age_days = self.rng.random_range(MIN_PET_AGE_DAYS..=MAX_PET_AGE_DAYS);
            let picture = self.rng.random_range(1..=1_000_u32);
            pets.push(MockPetSeed {
                image: format!(
                    "https://images.adoptme.dev/pets/{}/{picture}.jpg",
                    specie.replace(' ', "-")
                ),
                name,
                specie: specie.to_owned(),
                birth_date: today - TimeDelta::days(age_days),
            });
        }
        Ok(pets)
    }

    fn unique_email(
        &mut self,
        first_name: &str,
        last_name: &str,
        seen: &mut HashSet<String>,
    ) -> Result<String, GenerationError> {
        let local = format!("{}.{}", email_part(first_name), email_part(last_name));
        for _ in 0..MAX_EMAIL_ATTEMPTS {
            let provider: String = FreeEmailProvider(EN).fake_with_rng(&mut self.rng);
            let suffix = self.rng.random_range(1..EMAIL_SUFFIX_MAX);
            let candidate = format!("{local}{suffix}@{provider}");
            if seen.insert(candidate.clone()) {
                return Ok(candidate);
            }
        }
        Err(GenerationError::EmailExhausted {
            max_attempts: MAX_EMAIL_ATTEMPTS,
        })
    }
}

const fn ensure_batch(count: usize) -> Result<(), GenerationError> {
    if count > MAX_BATCH_SIZE {
        return Err(GenerationError::BatchTooLarge {
            requested: count,
            max: MAX_BATCH_SIZE,
        });
    }
    Ok(())
}

/// Lower-case ASCII alphanumerics of a name, for use in an email local part.
fn email_part(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
