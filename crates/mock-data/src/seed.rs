//! Plain records produced by the generator.
//!
//! These types are independent of the backend's domain so the crate can be
//! reused by tooling without pulling in the HTTP stack.

use chrono::{DateTime, NaiveDate, Utc};

/// Role assigned to a generated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockRole {
    /// Regular adopter account.
    User,
    /// Administrative account.
    Admin,
}

/// A generated user, minus identifiers and credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockUserSeed {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address, unique within the batch.
    pub email: String,
    /// Account role.
    pub role: MockRole,
    /// Recent moment the user was last seen.
    pub last_connection: DateTime<Utc>,
}

/// A generated pet, not yet adopted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockPetSeed {
    /// Pet name.
    pub name: String,
    /// Species label, lower case.
    pub specie: String,
    /// Date of birth.
    pub birth_date: NaiveDate,
    /// Picture URL.
    pub image: String,
}
