//! In-process [`UserRepository`] with unique emails.

use async_trait::async_trait;

use super::collection::Collection;
use crate::domain::ports::{RepositoryError, UserRepository};
use crate::domain::{EmailAddress, PetId, User, UserId};

/// User documents kept in memory.
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    users: Collection<User>,
}

fn email_key(user: &User) -> Option<String> {
    Some(format!("email:{}", user.email))
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(self.users.all().await)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self.users.get(*id).await)
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, RepositoryError> {
        Ok(self.users.find(|user| &user.email == email).await)
    }

    async fn insert(&self, user: &User) -> Result<(), RepositoryError> {
        self.users
            .insert_all(std::slice::from_ref(user), email_key)
            .await
    }

    async fn insert_many(&self, users: &[User]) -> Result<(), RepositoryError> {
        self.users.insert_all(users, email_key).await
    }

    async fn update(&self, user: &User) -> Result<bool, RepositoryError> {
        self.users.replace(user, email_key).await
    }

    async fn add_pet(&self, id: &UserId, pet: &PetId) -> Result<bool, RepositoryError> {
        let found = self
            .users
            .modify(*id, |user| {
                if !user.pets.contains(pet) {
                    user.pets.push(*pet);
                }
            })
            .await;
        Ok(found.is_some())
    }

    async fn remove_pet(&self, id: &UserId, pet: &PetId) -> Result<bool, RepositoryError> {
        let found = self
            .users
            .modify(*id, |user| user.pets.retain(|owned| owned != pet))
            .await;
        Ok(found.is_some())
    }

    async fn delete(&self, id: &UserId) -> Result<bool, RepositoryError> {
        Ok(self.users.remove(*id).await)
    }
}
