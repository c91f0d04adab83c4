//! User documents.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde_json::json;

use super::password::PasswordHash;
use super::validation::EmailAddress;
use super::{Error, ErrorKind, PetId, UserId};

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    /// Regular adopter.
    #[default]
    User,
    /// Administrator.
    Admin,
}

impl Role {
    /// Lower-case wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            _ => Err(Error::new(ErrorKind::FieldInvalidFormat)
                .with_detail(json!({ "field": "role", "value": s, "allowed": ["user", "admin"] }))),
        }
    }
}

/// A registered user.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Document id.
    pub id: UserId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Unique, normalised email.
    pub email: EmailAddress,
    /// Salted password digest.
    pub password: PasswordHash,
    /// Account role.
    pub role: Role,
    /// Pets adopted by the user, in adoption order.
    pub pets: Vec<PetId>,
    /// Last login or logout.
    pub last_connection: Option<DateTime<Utc>>,
}

impl User {
    /// Create a user with a fresh id and no pets.
    #[must_use]
    pub fn register(
        first_name: String,
        last_name: String,
        email: EmailAddress,
        password: PasswordHash,
        role: Role,
    ) -> Self {
        Self {
            id: UserId::generate(),
            first_name,
            last_name,
            email,
            password,
            role,
            pets: Vec::new(),
            last_connection: None,
        }
    }

    /// `first_name last_name`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Partial update applied by `PUT /api/users/{uid}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserUpdate {
    /// New given name.
    pub first_name: Option<String>,
    /// New family name.
    pub last_name: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// New role, as text.
    pub role: Option<String>,
}

impl UserUpdate {
    /// Whether the update changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.role.is_none()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("user", Role::User)]
    #[case("ADMIN", Role::Admin)]
    #[case(" Admin ", Role::Admin)]
    fn roles_parse_case_insensitively(#[case] raw: &str, #[case] expected: Role) {
        assert_eq!(raw.parse::<Role>().expect("valid role"), expected);
    }

    #[test]
    fn unknown_roles_are_invalid_format() {
        let err = "root".parse::<Role>().expect_err("unknown role");
        assert_eq!(err.kind(), ErrorKind::FieldInvalidFormat);
    }

    #[test]
    fn register_starts_without_pets() {
        let user = User::register(
            "Ana".to_owned(),
            "Lopez".to_owned(),
            EmailAddress::parse("ana@example.com").expect("email"),
            PasswordHash::create("pw"),
            Role::default(),
        );
        assert!(user.pets.is_empty());
        assert!(user.last_connection.is_none());
        assert_eq!(user.role, Role::User);
        assert_eq!(user.full_name(), "Ana Lopez");
    }
}
