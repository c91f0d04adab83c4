//! Reproducible fake users and pets for the adoption backend.
//!
//! The backend's mocking endpoints use this crate to populate the store with
//! believable records. It is deliberately independent of backend domain
//! types: the caller assigns identifiers, hashes credentials, and persists.
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use mock_data::{MockGenerator, MockRole};
//!
//! let mut generator = MockGenerator::from_seed(42, Utc::now());
//! let users = generator.users(5).expect("small batches succeed");
//!
//! assert_eq!(users.len(), 5);
//! assert!(users.iter().all(|u| matches!(u.role, MockRole::User | MockRole::Admin)));
//! ```

mod error;
mod generator;
mod seed;

pub use error::GenerationError;
pub use generator::{MAX_BATCH_SIZE, MockGenerator, SPECIES};
pub use seed::{MockPetSeed, MockRole, MockUserSeed};
