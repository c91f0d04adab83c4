//! Port for user document storage.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{EmailAddress, PetId, User, UserId};

/// Persistence operations on user documents.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Every user, in insertion order.
    async fn list(&self) -> Result<Vec<User>, RepositoryError>;

    /// Fetch a user by id.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError>;

    /// Fetch a user by normalised email.
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, RepositoryError>;

    /// Store a new user. Fails with `Duplicate` when the email is taken.
    async fn insert(&self, user: &User) -> Result<(), RepositoryError>;

    /// Store several new users atomically.
    async fn insert_many(&self, users: &[User]) -> Result<(), RepositoryError>;

    /// Replace a stored user; `false` when no such user exists.
    async fn update(&self, user: &User) -> Result<bool, RepositoryError>;

    /// Append `pet` to the user's pets in place; `false` when no such user
    /// exists.
    async fn add_pet(&self, id: &UserId, pet: &PetId) -> Result<bool, RepositoryError>;
    /// Drop `pet` from the user's pets in place; `false` when no such user
    /// exists.
    async fn remove_pet(&self, id: &UserId, pet: &PetId) -> Result<bool, RepositoryError>;
    /// Remove a user; `false` when no such user exists.
    async fn delete(&self, id: &UserId) -> Result<bool, RepositoryError>;
}
